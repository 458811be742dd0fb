use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{Level, info};

use recipebox::config::AppConfig;
use recipebox::database::init_db;
use recipebox::seed::seed_ingredients_from_csv;
use recipebox::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    info!("Database connected and schema synced");

    if let Some(ref csv_path) = config.data.ingredients_csv {
        seed_ingredients_from_csv(&db, csv_path).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = cors_layer(&config)?;

    let state = AppState { db, config };
    let mut app = recipebox::build_router(state);
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> anyhow::Result<Option<CorsLayer>> {
    if config.server.cors.allow_origins.is_empty() {
        return Ok(None);
    }
    let origins = config
        .server
        .cors
        .allow_origins
        .iter()
        .map(|o| Ok(o.parse::<HeaderValue>()?))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .max_age(Duration::from_secs(config.server.cors.max_age)),
    ))
}
