/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use routinely_web::{app::{AppState, build_router}, config::Config};
/// use routinely_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::no_cache::NoCacheLayer};
use axum::{
    extract::FromRef,
    routing::get,
    Router,
};
use routinely_shared::session::SessionStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Server-side session store
    pub sessions: SessionStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state with an empty session store
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET/POST /                # task list / completion toggle, clear-all
/// ├── GET/POST /new             # creation form / insert
/// ├── GET/POST /edit/:task_id   # edit form / update or delete
/// ├── GET/POST /register        # registration form / account creation
/// ├── GET/POST /login           # login form / authentication
/// ├── GET/POST /account         # account form / password change, deletion
/// └── GET      /logout          # session clear
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Cache-disabling response headers (every response)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route(
            "/",
            get(routes::tasks::index).post(routes::tasks::submit),
        )
        .route(
            "/new",
            get(routes::tasks::new_form).post(routes::tasks::create),
        )
        .route(
            "/edit/:task_id",
            get(routes::tasks::edit_form).post(routes::tasks::edit_submit),
        )
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route(
            "/account",
            get(routes::account::account_form).post(routes::account::submit),
        )
        .route("/logout", get(routes::auth::logout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(NoCacheLayer::new())
        .with_state(state)
}
