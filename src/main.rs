use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod leaderboard;
mod models;
mod routes;
mod scoring;
mod source;
mod sync;

#[cfg(test)]
mod tests;

use routes::AppState;
use source::CricApiClient;
use sync::SyncService;

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting api server...");

    dotenvy::dotenv().ok();

    let config = config::Config::from_env();

    // Create database connection pool
    let pool = SqlitePool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    tracing::info!("Database connection established.");

    let source = Arc::new(CricApiClient::new(&config.api_base_url, &config.api_key));
    let sync_service = Arc::new(SyncService::new(
        pool.clone(),
        source,
        config.player_sync_limit,
        config.match_sync_limit,
    ));

    // Startup sync runs in the background so the server comes up immediately.
    {
        let service = Arc::clone(&sync_service);
        tokio::spawn(async move {
            service.initialize().await;
        });
    }

    sync::spawn_schedules(Arc::clone(&sync_service));

    let addr = SocketAddr::from((config.host, config.port));

    // CORS configuration for the frontend
    let cors = CorsLayer::new()
        .allow_origin(Any) // In production, use specific origins
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        pool,
        sync: sync_service,
    };

    let app = Router::new()
        // Root and health
        .route("/", get(|| async { "Cricket Stats API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Sync endpoints
        .route("/api/admin/sync/{target}", post(routes::sync::force_sync))
        .route("/api/players/search", get(routes::sync::search_players))
        .route("/api/sync/players/{external_id}", get(routes::sync::refresh_player))
        .route("/api/sync/matches/{external_id}", get(routes::sync::refresh_match))

        // Fantasy endpoints
        .route("/api/fantasy/matches/{id}/score", post(routes::fantasy::score_match))
        .route("/api/fantasy/score-completed", post(routes::fantasy::score_completed))
        .route("/api/fantasy/matches/{id}/leaderboard", get(routes::fantasy::match_leaderboard))
        .route("/api/fantasy/leaderboard", get(routes::fantasy::overall_leaderboard))
        .route("/api/fantasy/players/{id}/trend", get(routes::fantasy::player_trend))
        .route("/api/fantasy/summary", get(routes::fantasy::summary))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
