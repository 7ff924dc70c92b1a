use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

/// A numeric id taken from the path, e.g. `/posts/:id`.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	#[validate(range(min = 1))]
	pub id: i64,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::IdInput;

	#[test]
	fn test_id_must_be_positive() {
		assert!(IdInput { id: 1 }.validate().is_ok());
		assert!(IdInput { id: 0 }.validate().is_err());
		assert!(IdInput { id: -5 }.validate().is_err());
	}
}
