//! # Routinely Web Server
//!
//! A personal task tracker: register, log in, create one-off or recurring
//! tasks with due dates, and mark them complete. Completing a recurring
//! task schedules its next occurrence.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p routinely-web
//! ```

use routinely_web::{
    app::{build_router, AppState},
    config::Config,
};
use routinely_shared::db::{migrations::run_migrations, pool, seed::apply_seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routinely_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Routinely v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        path: config.database.path.clone(),
        max_connections: config.database.max_connections,
        create_if_missing: true,
    })
    .await?;

    run_migrations(&db).await?;

    // Re-stage sample data on every boot when configured
    if let Some(path) = &config.seed_sql {
        let sql = std::fs::read_to_string(path)?;
        apply_seed(&db, &sql).await?;
        tracing::info!("Applied seed script from {}", path);
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
