/// Request-scoped session context
///
/// Every handler receives an explicit [`SessionContext`] extracted from the
/// session cookie; there is no ambient request state. Handlers branch on
/// `user_id` for the authenticated/anonymous split and use `token` for flash
/// and logout operations.
///
/// # Example
///
/// ```ignore
/// async fn index(ctx: SessionContext) -> Response {
///     match ctx.user_id {
///         Some(user_id) => render_tasks(user_id).await,
///         None => render_login_prompt(),
///     }
/// }
/// ```

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use super::store::SessionStore;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "routinely_session";

/// Resolved session state for one request
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Token presented by the request, whether or not it is still live
    pub token: Option<String>,

    /// User bound to a live session; `None` means anonymous
    pub user_id: Option<i64>,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

        let user_id = match &token {
            Some(token) => SessionStore::from_ref(state).user_id(token).await,
            None => None,
        };

        Ok(SessionContext { token, user_id })
    }
}
