use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::request,
};

use crate::{
	error::RouteError,
	model::User,
	route::auth,
	store::SessionStore,
};

/// Extracts the signed-in user from the session store.
///
/// If nobody is signed in, a [`auth::Error::Unauthenticated`] is returned.
///
/// ```rust,ignore
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub user: User,
	pub token: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	SessionStore: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = RouteError<auth::Error>;

	async fn from_request_parts(
		_parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let Some((user, token)) = SessionStore::from_ref(state).current().signed_in() else {
			return Err(auth::Error::Unauthenticated.into());
		};

		Ok(Self { user, token })
	}
}

impl OperationInput for Session {}
