//! Web server implementation using Axum

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes::{
    get_dashboard, get_index, get_login, get_me, get_register, get_users, health, post_login,
    post_logout, post_register, ready, AppState,
};

/// Build the application router
///
/// Page routes guard themselves through the `CurrentUser` extractor, API
/// routes through `ApiUser`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Pages
        .route("/", get(get_index))
        .route("/register", get(get_register))
        .route("/login", get(get_login))
        .route("/dashboard", get(get_dashboard))
        // API
        .route("/api/register", post(post_register))
        .route("/api/login", post(post_login))
        .route("/api/logout", post(post_logout))
        .route("/api/me", get(get_me))
        .route("/api/users", get(get_users))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the web server
#[tracing::instrument(skip(config))]
pub async fn serve(config: Config, host: String, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting passgate server...");

    let db_pool =
        crate::db::create_pool(&config.database.url, config.database.max_connections).await?;
    crate::db::migrate(&db_pool).await?;

    let state = AppState::new(db_pool, &config.jwt);
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
