use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::app::model::{HealthStatus, ScrapeRequest};
use crate::formats::ScrapeResult;
use crate::scraper::Scraper;

#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<Scraper>,
}

impl AppState {
    pub fn new(scraper: Scraper) -> Self {
        Self {
            scraper: Arc::new(scraper),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/scrape", post(scrape_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

async fn scrape_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScrapeResult>, (StatusCode, String)> {
    // The body is decoded whatever the Content-Type says.
    let req: ScrapeRequest = serde_json::from_slice(&body).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            format!("invalid request body: {err}"),
        )
    })?;
    let Some(url) = req.url() else {
        return Err((StatusCode::BAD_REQUEST, "url is required".to_string()));
    };

    let result = state.scraper.scrape(url).await.map_err(|err| {
        tracing::warn!(url, ?err, "scrape failed");
        (StatusCode::BAD_GATEWAY, format!("{err:#}"))
    })?;

    Ok(Json(result))
}
