use crate::model::{Category, Post};

use super::Error;

/// Where the post store gets its initial collection from.
pub trait PostSource: Send + Sync {
	fn load(&self) -> Result<Vec<Post>, Error>;
}

/// The static fixture used in place of a real backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedPosts;

fn seed(
	id: i64,
	title: &str,
	body: &str,
	image: &str,
	category: Category,
	tags: &[&str],
	likes: u64,
) -> Post {
	Post {
		id,
		user_id: 1,
		title: title.into(),
		body: body.into(),
		image: format!("https://picsum.photos/seed/{image}/800/400"),
		category,
		tags: tags.iter().map(|&tag| tag.to_owned()).collect(),
		likes,
		comments: Vec::new(),
	}
}

impl PostSource for SeedPosts {
	fn load(&self) -> Result<Vec<Post>, Error> {
		Ok(vec![
			seed(
				1,
				"How Authentication Works in This App",
				"<h2>Authentication Flow</h2><p>This application uses a JWT-based authentication system managed by the <code>useAuth</code> hook. When you log in, a mock token is generated and stored in <code>localStorage</code>.</p><h3>Key Components:</h3><ul><li><strong>useAuth Hook:</strong> Manages the user state (<code>user</code>, <code>isAuthenticated</code>) and provides <code>login</code> and <code>logout</code> methods.</li><li><strong>Persistence:</strong> The hook checks <code>localStorage</code> on initialization to restore the session.</li><li><strong>Security:</strong> While this is a demo, a real app would validate the token with a backend API.</li></ul><p>Check <code>hooks/useAuth.ts</code> to see the implementation details.</p>",
				"auth",
				Category::Development,
				&["Auth", "Security", "React Hooks"],
				12,
			),
			seed(
				2,
				"State Management with Zustand",
				"<h2>Why Zustand?</h2><p>We chose Zustand for state management because it's lightweight, boilerplate-free, and easy to use with React hooks.</p><h3>Implementation Details</h3><p>The <code>usePosts</code> store handles all blog-related data:</p><ul><li><strong>Posts Array:</strong> Stores the list of blog posts.</li><li><strong>Filtering & Search:</strong> Manages <code>searchQuery</code> and <code>selectedCategory</code> state.</li><li><strong>Pagination:</strong> Tracks <code>currentPage</code> and calculates paginated results.</li><li><strong>Actions:</strong> Provides <code>addPost</code>, <code>updatePost</code>, and <code>deletePost</code> methods that simulate API calls.</li></ul><p>This centralized store makes it easy to share state between the Dashboard, Search, and Pagination components.</p>",
				"zustand",
				Category::Technology,
				&["State Management", "Zustand", "Architecture"],
				8,
			),
			seed(
				3,
				"Implementing Protected Routes",
				"<h2>Securing the Application</h2><p>Certain routes like the Dashboard, Create Post, and Edit Post pages are protected and require the user to be logged in.</p><h3>The PrivateRoute Component</h3><p>We implemented a <code>PrivateRoute</code> wrapper component that checks the authentication status:</p><pre><code>if (!isAuthenticated) {\n  return null; // or redirect\n}</code></pre><p>If the user is not authenticated, they are automatically redirected to the Login page using Next.js <code>useRouter</code>. This ensures that sensitive areas of the application remain secure.</p>",
				"security",
				Category::BestPractices,
				&["Routing", "Security", "Next.js"],
				5,
			),
			seed(
				4,
				"Form Validation with React Hook Form & Yup",
				"<h2>Robust Form Handling</h2><p>Creating and editing posts requires reliable form validation. We combined <strong>React Hook Form</strong> for performance with <strong>Yup</strong> for schema validation.</p><h3>Features:</h3><ul><li><strong>Schema Definition:</strong> We define a Yup schema that enforces rules like minimum character counts for titles and content.</li><li><strong>Error Handling:</strong> Validation errors are displayed instantly below the input fields.</li><li><strong>Integration:</strong> The <code>Controller</code> component is used to integrate the custom Rich Text Editor with the form library.</li></ul><p>This approach ensures data integrity before it even reaches the 'backend'.</p>",
				"forms",
				Category::Development,
				&["Forms", "Validation", "UX"],
				3,
			),
			seed(
				5,
				"Rich Text Editing with React Quill",
				"<h2>Enhanced Content Creation</h2><p>To allow for formatted blog posts, we integrated <strong>React Quill</strong>.</p><h3>Implementation:</h3><p>The <code>RichTextEditor</code> component wraps the Quill editor and customizes the toolbar to provide essential formatting options like:</p><ul><li>Headers and Lists</li><li>Bold, Italic, Underline</li><li>Links and Blockquotes</li></ul><p>We also use <strong>DOMPurify</strong> to sanitize the HTML output before rendering it, preventing XSS attacks when displaying the blog posts.</p>",
				"editor",
				Category::Design,
				&["Rich Text", "UI", "Libraries"],
				15,
			),
			seed(
				6,
				"Search, Filter, and Pagination",
				"<h2>Managing Large Datasets</h2><p>A good blog needs to be navigable. We implemented client-side filtering and pagination directly in the <code>usePosts</code> store.</p><h3>How it Works:</h3><ol><li><strong>Filtering:</strong> The <code>getFilteredPosts</code> selector filters the posts array based on the search query and selected category.</li><li><strong>Pagination:</strong> The <code>getPaginatedPosts</code> selector takes the filtered results and slices them based on the <code>currentPage</code> and <code>postsPerPage</code>.</li></ol><p>This logic ensures that the UI remains responsive even as the user filters and changes pages.</p>",
				"search",
				Category::Technology,
				&["Algorithms", "UX", "Performance"],
				7,
			),
			seed(
				7,
				"Theming: Dark & Light Mode",
				"<h2>Modern UI with Theme Support</h2><p>The application supports both Dark and Light modes using Tailwind CSS and a custom <code>ThemeProvider</code>.</p><h3>Implementation:</h3><ul><li><strong>Context:</strong> A <code>ThemeContext</code> stores the current theme preference.</li><li><strong>Persistence:</strong> The preference is saved to <code>localStorage</code> so it persists across reloads.</li><li><strong>Tailwind:</strong> We use Tailwind's <code>dark:</code> modifier and CSS variables for colors (e.g., <code>bg-background</code>, <code>text-foreground</code>) to ensure seamless switching.</li></ul><p>Try toggling the theme in the navbar to see it in action!</p>",
				"theme",
				Category::Design,
				&["Theming", "Tailwind", "CSS"],
				20,
			),
		])
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn test_seed_posts_are_unique() {
		let posts = SeedPosts.load().unwrap();
		let ids = posts.iter().map(|post| post.id).collect::<HashSet<_>>();

		assert_eq!(posts.len(), 7);
		assert_eq!(ids.len(), posts.len());
		assert!(posts.iter().all(|post| post.comments.is_empty()));
	}

	#[test]
	fn test_seed_fixture() {
		let posts = SeedPosts.load().unwrap();

		assert_eq!(posts[0].title, "How Authentication Works in This App");
		assert_eq!(posts[1].title, "State Management with Zustand");
		assert_eq!(posts[1].tags, ["State Management", "Zustand", "Architecture"]);
		assert_eq!(posts[6].likes, 20);
		assert_eq!(posts[2].category, Category::BestPractices);
	}
}
