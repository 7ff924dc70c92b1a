use aide::{openapi::Tag, transform::TransformOpenApi};

pub mod tag {
	pub const AUTH: &str = "Auth";
	pub const POST: &str = "Post";
	pub const THEME: &str = "Theme";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Pressroom")
		.summary("A blog backed by in-memory mock data")
		.description(
			"Posts are seeded from static data and live in memory. \
			 Authentication is mocked: any email signs in.",
		)
		.tag(Tag {
			name: tag::AUTH.into(),
			description: Some("Mocked sign in and sign out".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Posts, likes and comments".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::THEME.into(),
			description: Some("Persisted UI theme".into()),
			..Default::default()
		})
}
