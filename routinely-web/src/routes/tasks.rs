/// Task endpoints
///
/// This module provides the task surface:
/// - List view with due-date grouping and completion toggling
/// - Clear-all (undo every completion)
/// - Creation and edit forms
///
/// # Endpoints
///
/// - `GET /` - Task list (login prompt when anonymous)
/// - `POST /` - Completion toggle or clear-all
/// - `GET /new` - Creation form
/// - `POST /new` - Insert task
/// - `GET /edit/:task_id` - Edit form
/// - `POST /edit/:task_id` - Update or delete

use crate::{
    app::AppState,
    error::WebResult,
    routes::take_flash,
    views,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use routinely_shared::{
    models::task::{bucket_by_due, CreateTask, Task},
    session::SessionContext,
};
use serde::Deserialize;

/// Task form fields shared by the create and edit pages
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    /// Free-text title
    pub title: String,

    /// Due date, stored as submitted
    pub date: String,

    /// Frequency code (0 none, 1 daily, 2 weekly, 3 monthly, 4 yearly)
    pub freq: i64,

    /// Present when the edit form's delete button was pressed
    pub delete: Option<String>,
}

/// Task list view
///
/// Anonymous requests get the login prompt with no task data. Authenticated
/// requests get the caller's incomplete tasks grouped by how soon they are
/// due.
pub async fn index(State(state): State<AppState>, ctx: SessionContext) -> WebResult<Response> {
    let flash = take_flash(&state, &ctx).await;

    let Some(user_id) = ctx.user_id else {
        return Ok(views::login_page(flash.as_deref()).into_response());
    };

    let tasks = Task::list_incomplete_for_user(&state.db, user_id).await?;
    let buckets = bucket_by_due(tasks, Utc::now());

    Ok(views::index_page(&buckets, flash.as_deref()).into_response())
}

/// Completion toggle / clear-all submission
///
/// A non-empty form carries exactly one field whose *name* is the task id
/// to toggle; the toggle is keyed by that id alone. An empty form is the
/// clear-all action, which resets every completion the caller owns. Both
/// commit before redirecting back to the list so a reload cannot resubmit.
pub async fn submit(
    State(state): State<AppState>,
    ctx: SessionContext,
    Form(fields): Form<Vec<(String, String)>>,
) -> WebResult<Redirect> {
    if let Some((name, _value)) = fields.first() {
        if let Ok(task_id) = name.parse::<i64>() {
            Task::toggle_complete(&state.db, task_id).await?;
            // No matching recurring row is an expected, silent outcome
            Task::spawn_successor(&state.db, task_id).await?;
        }
    } else if let Some(user_id) = ctx.user_id {
        Task::clear_completions(&state.db, user_id).await?;
    }

    Ok(Redirect::to("/"))
}

/// Creation form
pub async fn new_form(ctx: SessionContext) -> Response {
    if ctx.user_id.is_some() {
        views::new_page().into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

/// Inserts a new task for the caller
///
/// Fields are stored as submitted; there is no validation beyond what the
/// storage layer enforces.
pub async fn create(
    State(state): State<AppState>,
    ctx: SessionContext,
    Form(form): Form<TaskForm>,
) -> WebResult<Redirect> {
    let Some(user_id) = ctx.user_id else {
        return Ok(Redirect::to("/"));
    };

    Task::create(
        &state.db,
        CreateTask {
            user_id,
            title: form.title,
            date: form.date,
            freq: form.freq,
        },
    )
    .await?;

    Ok(Redirect::to("/"))
}

/// Edit form, pre-populated with the task's current values
///
/// A missing, foreign, or malformed task id redirects to the list view
/// silently.
pub async fn edit_form(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(task_id): Path<String>,
) -> WebResult<Response> {
    let Some(user_id) = ctx.user_id else {
        return Ok(Redirect::to("/").into_response());
    };
    let Ok(task_id) = task_id.parse::<i64>() else {
        return Ok(Redirect::to("/").into_response());
    };

    match Task::find_for_user(&state.db, user_id, task_id).await? {
        Some(task) => Ok(views::edit_page(&task).into_response()),
        None => Ok(Redirect::to("/").into_response()),
    }
}

/// Applies an edit-form submission: delete, or update in place
///
/// Both operations are scoped to the caller, so a foreign id touches
/// nothing and falls through to the same redirect.
pub async fn edit_submit(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(task_id): Path<String>,
    Form(form): Form<TaskForm>,
) -> WebResult<Redirect> {
    let Some(user_id) = ctx.user_id else {
        return Ok(Redirect::to("/"));
    };
    let Ok(task_id) = task_id.parse::<i64>() else {
        return Ok(Redirect::to("/"));
    };

    if form.delete.is_some() {
        Task::delete_for_user(&state.db, user_id, task_id).await?;
    } else {
        Task::update_fields(&state.db, user_id, task_id, &form.title, &form.date, form.freq)
            .await?;
    }

    Ok(Redirect::to("/"))
}
