/// Account management endpoints
///
/// This module provides password change and account deletion. Both verify
/// the current password first; deletion removes every task the user owns
/// along with the user row and ends the session.
///
/// # Endpoints
///
/// - `GET /account` - Account form
/// - `POST /account` - Password change, or deletion when the delete button
///   was pressed
///
/// # Error paths
///
/// Deletion with a wrong current password flashes `ERROR: invalid password`.
/// A password change with a wrong current password redirects back with no
/// flash. Storage failures are logged and collapse to a redirect to
/// `/account`.

use crate::{
    app::AppState,
    routes::{clear_session, flash_redirect, take_flash},
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
    models::task::Task,
    models::user::User,
    session::SessionContext,
};
use serde::Deserialize;

/// Account form fields
///
/// The change-password and delete actions share one form; the delete
/// submit button contributes the `delete` field.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// Current password, required by both actions
    pub current: String,

    /// New password
    #[serde(default)]
    pub new: Option<String>,

    /// New password, confirmed
    #[serde(default)]
    pub new2: Option<String>,

    /// Present when the delete button was pressed
    pub delete: Option<String>,
}

/// Account management form
pub async fn account_form(State(state): State<AppState>, ctx: SessionContext) -> Response {
    let flash = take_flash(&state, &ctx).await;

    if ctx.user_id.is_some() {
        views::account_page(flash.as_deref()).into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

/// Applies an account-form submission
pub async fn submit(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
    Form(form): Form<AccountForm>,
) -> Response {
    let Some(user_id) = ctx.user_id else {
        return Redirect::to("/").into_response();
    };

    if form.delete.is_some() {
        delete_account(&state, jar, &ctx, user_id, &form.current).await
    } else {
        change_password(&state, jar, &ctx, user_id, &form).await
    }
}

/// Deletes the account after verifying the current password
async fn delete_account(
    state: &AppState,
    jar: CookieJar,
    ctx: &SessionContext,
    user_id: i64,
    current: &str,
) -> Response {
    let user = match User::find_by_id(&state.db, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/account").into_response(),
        Err(err) => {
            tracing::error!("Account lookup failed: {}", err);
            return Redirect::to("/account").into_response();
        }
    };

    match verify_password(current, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return flash_redirect(state, jar, ctx, "ERROR: invalid password", "/account").await;
        }
        Err(err) => {
            tracing::error!("Credential verification failed: {}", err);
            return Redirect::to("/account").into_response();
        }
    }

    if let Err(err) = Task::delete_all_for_user(&state.db, user_id).await {
        tracing::error!("Account task deletion failed: {}", err);
        return Redirect::to("/account").into_response();
    }
    if let Err(err) = User::delete(&state.db, user_id).await {
        tracing::error!("Account deletion failed: {}", err);
        return Redirect::to("/account").into_response();
    }

    let jar = clear_session(state, jar, ctx).await;
    (jar, Redirect::to("/")).into_response()
}

/// Replaces the credential after verifying the current password
async fn change_password(
    state: &AppState,
    jar: CookieJar,
    ctx: &SessionContext,
    user_id: i64,
    form: &AccountForm,
) -> Response {
    let new = form.new.clone().unwrap_or_default();
    let new2 = form.new2.clone().unwrap_or_default();

    if new != new2 {
        return flash_redirect(
            state,
            jar,
            ctx,
            "ERROR: new password & confirmation must match",
            "/account",
        )
        .await;
    }

    let user = match User::find_by_id(&state.db, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/account").into_response(),
        Err(err) => {
            tracing::error!("Account lookup failed: {}", err);
            return Redirect::to("/account").into_response();
        }
    };

    match verify_password(&form.current, &user.password_hash) {
        Ok(true) => {}
        // Unlike deletion, a wrong current password here redirects with no
        // flash
        Ok(false) => return Redirect::to("/account").into_response(),
        Err(err) => {
            tracing::error!("Credential verification failed: {}", err);
            return Redirect::to("/account").into_response();
        }
    }

    let password_hash = match hash_password(&new) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!("Credential hashing failed: {}", err);
            return Redirect::to("/account").into_response();
        }
    };

    if let Err(err) = User::update_password_hash(&state.db, user_id, &password_hash).await {
        tracing::error!("Credential update failed: {}", err);
        return Redirect::to("/account").into_response();
    }

    Redirect::to("/").into_response()
}
