/// Authentication endpoints
///
/// This module provides registration, login, and logout. Sessions are
/// server-side; a successful registration or login rotates the caller onto
/// a fresh token.
///
/// # Endpoints
///
/// - `GET /register` - Registration form (clears any existing session)
/// - `POST /register` - Create account and log in
/// - `GET /login` - Login form (clears any existing session)
/// - `POST /login` - Authenticate
/// - `GET /logout` - Clear session
///
/// # Error paths
///
/// A taken username flashes `ERROR: invalid username` back to the
/// registration form. A wrong password flashes
/// `ERROR: invalid username/password combination` back to the login form,
/// while an unknown username takes the same redirect with no flash — the
/// two cases are not distinguishable from the response alone. Unexpected
/// storage failures are logged and collapse to a redirect to `/login`.

use crate::{
    app::AppState,
    routes::{clear_session, flash_redirect, session_cookie, take_flash},
    views,
};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use routinely_shared::{
    auth::password::{hash_password, verify_password},
    models::user::{CreateUser, User},
    session::SessionContext,
};
use serde::Deserialize;

/// Login / registration form fields
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Registration form
pub async fn register_form(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
) -> Response {
    let flash = take_flash(&state, &ctx).await;
    let jar = clear_session(&state, jar, &ctx).await;
    (jar, views::register_page(flash.as_deref())).into_response()
}

/// Creates an account and logs the new user in
pub async fn register(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match User::find_by_username(&state.db, &form.username).await {
        Ok(Some(_)) => {
            return flash_redirect(&state, jar, &ctx, "ERROR: invalid username", "/register")
                .await;
        }
        Ok(None) => {}
        Err(err) => {
            tracing::error!("Registration lookup failed: {}", err);
            return Redirect::to("/login").into_response();
        }
    }

    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!("Credential hashing failed: {}", err);
            return Redirect::to("/login").into_response();
        }
    };

    match User::create(
        &state.db,
        CreateUser {
            username: form.username,
            password_hash,
        },
    )
    .await
    {
        Ok(user) => {
            let jar = clear_session(&state, jar, &ctx).await;
            let token = state.sessions.create(Some(user.id)).await;
            (jar.add(session_cookie(token)), Redirect::to("/")).into_response()
        }
        // The lookup/insert race lands here as a unique violation
        Err(err) => {
            tracing::error!("Registration failed: {}", err);
            Redirect::to("/login").into_response()
        }
    }
}

/// Login form
pub async fn login_form(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
) -> Response {
    let flash = take_flash(&state, &ctx).await;
    let jar = clear_session(&state, jar, &ctx).await;
    (jar, views::login_page(flash.as_deref())).into_response()
}

/// Authenticates a user and establishes a session
pub async fn login(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let user = match User::find_by_username(&state.db, &form.username).await {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(err) => {
            tracing::error!("Login lookup failed: {}", err);
            return Redirect::to("/login").into_response();
        }
    };

    match verify_password(&form.password, &user.password_hash) {
        Ok(true) => {
            let jar = clear_session(&state, jar, &ctx).await;
            let token = state.sessions.create(Some(user.id)).await;
            (jar.add(session_cookie(token)), Redirect::to("/")).into_response()
        }
        Ok(false) => {
            flash_redirect(
                &state,
                jar,
                &ctx,
                "ERROR: invalid username/password combination",
                "/login",
            )
            .await
        }
        Err(err) => {
            tracing::error!("Credential verification failed: {}", err);
            Redirect::to("/login").into_response()
        }
    }
}

/// Clears the session and returns to the (now anonymous) list view
pub async fn logout(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
) -> Response {
    let jar = clear_session(&state, jar, &ctx).await;
    (jar, Redirect::to("/")).into_response()
}
