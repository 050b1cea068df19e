use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::signal;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecotrack_common::Config;
use ecotrack_store::{demo_data, load_seed_file, MemStore};

mod error;
mod rest;

pub struct AppState {
    pub store: MemStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ecotrack=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let seed = match &config.seed_file {
        Some(path) => load_seed_file(path)?,
        None => demo_data(chrono::Utc::now()),
    };
    let state = Arc::new(AppState {
        store: MemStore::from_seed(seed)?,
    });

    let addr = config.bind_addr();
    info!("EcoTrack API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("EcoTrack API stopped");
    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Recycling
        .route("/api/recycling", get(rest::recycling::api_recycling_near))
        .route(
            "/api/recycling/materials",
            get(rest::recycling::api_recycling_materials),
        )
        .route("/api/recycling/{id}", get(rest::recycling::api_recycling_center))
        // Products
        .route(
            "/api/products",
            get(rest::products::api_products).post(rest::products::api_create_product),
        )
        .route("/api/products/search", get(rest::products::api_product_search))
        .route(
            "/api/products/barcode/{barcode}",
            get(rest::products::api_product_by_barcode),
        )
        .route("/api/products/{id}", get(rest::products::api_product_detail))
        // Scans
        .route(
            "/api/scans",
            get(rest::products::api_scans).post(rest::products::api_create_scan),
        )
        .route("/api/scans/recent", get(rest::products::api_recent_scans))
        // Articles
        .route("/api/articles", get(rest::articles::api_articles))
        .route("/api/articles/{id}", get(rest::articles::api_article_detail))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path only, so user coordinates in the query never hit the logs
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
