/// Route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `tasks`: Task list, completion toggling, creation, and editing
/// - `auth`: Registration, login, and logout
/// - `account`: Password change and account deletion
///
/// Shared session/cookie helpers live here: handlers receive an explicit
/// [`SessionContext`] and pass it back through these functions to mutate
/// session state.

pub mod account;
pub mod auth;
pub mod tasks;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use routinely_shared::session::{SessionContext, SESSION_COOKIE};

use crate::app::AppState;

/// Builds the session cookie carrying an opaque token
pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

/// Ends the request's session, if any, and drops its cookie
pub(crate) async fn clear_session(
    state: &AppState,
    jar: CookieJar,
    ctx: &SessionContext,
) -> CookieJar {
    if let Some(token) = &ctx.token {
        state.sessions.clear(token).await;
    }
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// Takes the pending one-shot flash message for this request's session
pub(crate) async fn take_flash(state: &AppState, ctx: &SessionContext) -> Option<String> {
    match &ctx.token {
        Some(token) => state.sessions.take_flash(token).await,
        None => None,
    }
}

/// Stores a flash message and redirects
///
/// Reuses the live session when there is one; otherwise issues an anonymous
/// session so the message survives the redirect.
pub(crate) async fn flash_redirect(
    state: &AppState,
    jar: CookieJar,
    ctx: &SessionContext,
    message: &str,
    to: &str,
) -> Response {
    if let Some(token) = &ctx.token {
        if state.sessions.set_flash(token, message).await {
            return (jar, Redirect::to(to)).into_response();
        }
    }

    let token = state.sessions.create(None).await;
    state.sessions.set_flash(&token, message).await;
    (jar.add(session_cookie(token)), Redirect::to(to)).into_response()
}
