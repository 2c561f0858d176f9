/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A fresh in-memory database with migrations applied
/// - The real router, driven directly via tower
/// - Form-post and session-cookie helpers

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use routinely_shared::db::migrations::run_migrations;
use routinely_shared::db::pool::{create_pool, DatabaseConfig};
use routinely_shared::models::task::Task;
use routinely_web::app::{build_router, AppState};
use routinely_web::config::{Config, DatabaseConfig as DatabaseSettings, HttpConfig};
use sqlx::SqlitePool;
use tower::ServiceExt as _;

/// Test context: a fresh database and a router over it
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with an empty in-memory database
    pub async fn new() -> Self {
        // A single connection keeps every statement on the same in-memory
        // database
        let db = create_pool(DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
            create_if_missing: true,
        })
        .await
        .expect("pool should connect");

        run_migrations(&db).await.expect("migrations should run");

        let config = Config {
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseSettings {
                path: ":memory:".to_string(),
                max_connections: 1,
            },
            seed_sql: None,
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        TestContext { db, app }
    }

    /// Sends a GET request, optionally with a session cookie
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Sends a form-encoded POST request, optionally with a session cookie
    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Registers a user and returns the session cookie pair
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/register",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;

        assert_redirect(&response, "/");
        session_cookie(&response).expect("registration should set a session cookie")
    }

    /// Creates a task through the form and returns its id
    ///
    /// `title` must already be form-encoded (spaces as `+`).
    pub async fn create_task(&self, cookie: &str, title: &str, date: &str, freq: i64) -> i64 {
        let response = self
            .post_form(
                "/new",
                &format!("title={title}&date={date}&freq={freq}"),
                Some(cookie),
            )
            .await;
        assert_redirect(&response, "/");

        let (id,): (i64,) = sqlx::query_as("SELECT id FROM tasks ORDER BY id DESC LIMIT 1")
            .fetch_one(&self.db)
            .await
            .expect("task should exist");
        id
    }

    /// Loads one task row by id straight from the database
    pub async fn task(&self, id: i64) -> Option<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, date, freq, complete FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .unwrap()
    }

    /// Loads every task row, id-ordered
    pub async fn all_tasks(&self) -> Vec<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, date, freq, complete FROM tasks ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
        .unwrap()
    }

    /// Counts user rows with the given username
    pub async fn users_named(&self, username: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }
}

/// Extracts the `name=value` pair of the response's session cookie
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

/// Asserts a see-other redirect to the given location
pub fn assert_redirect(response: &Response<Body>, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

/// Collects a response body into a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}
