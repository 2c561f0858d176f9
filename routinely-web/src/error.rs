/// Error handling for the web server
///
/// Most failures are recovered inside their handler: missing or foreign
/// rows redirect silently, user mistakes flash a message, and storage
/// failures on the login/registration/account paths redirect to a safe
/// page. What remains — storage failing under the task list itself — has
/// no local recovery and surfaces here as a logged 500.
///
/// # Example
///
/// ```ignore
/// async fn handler(State(state): State<AppState>) -> WebResult<Html<String>> {
///     let tasks = Task::list_incomplete_for_user(&state.db, user_id).await?;
///     Ok(render(tasks))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use routinely_shared::models::StoreError;
use std::fmt;

/// Web result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Error type for failures without a handler-level recovery path
#[derive(Debug)]
pub enum WebError {
    /// Storage failure (500)
    Store(StoreError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Store(err) => write!(f, "Storage failure: {}", err),
        }
    }
}

impl std::error::Error for WebError {}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        WebError::Store(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        // Log the detail but don't expose it to clients
        tracing::error!("Unhandled error: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WebError::Store(StoreError::TaskNotFound);
        assert_eq!(err.to_string(), "Storage failure: task not found");
    }

    #[test]
    fn test_error_response_is_500() {
        let response = WebError::Store(StoreError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
