use schemars::JsonSchema;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// The longest display name accepted, counted after trimming.
pub const MAX_NAME_LENGTH: usize = 64;

fn validate_name(name: &str) -> Result<(), ValidationError> {
	let length = name.trim().chars().count();

	if length == 0 {
		return Err(ValidationError::new("name must not be blank"));
	}

	if length > MAX_NAME_LENGTH {
		return Err(ValidationError::new("name must be at most 64 characters"));
	}

	Ok(())
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct LoginInput {
	#[validate(email)]
	pub email: String,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct RegisterInput {
	#[validate(email)]
	pub email: String,
	/// The name that is displayed next to comments. Surrounding whitespace is dropped.
	#[validate(custom(function = "validate_name"))]
	pub name: String,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::RegisterInput;

	fn input(name: &str) -> RegisterInput {
		RegisterInput {
			email: "grace@example.com".into(),
			name: name.into(),
		}
	}

	#[test]
	fn test_name_is_trimmed_before_checking() {
		assert!(input("Grace").validate().is_ok());
		assert!(input("  Grace  ").validate().is_ok());
		assert!(input("").validate().is_err());
		assert!(input("   ").validate().is_err());
		assert!(input(&"a".repeat(65)).validate().is_err());
		assert!(input(&format!("  {}  ", "a".repeat(64))).validate().is_ok());
	}
}
