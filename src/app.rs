use crate::catalog::Category;
use crate::config::Config;
use crate::fetch::MovieFetcher;
use crate::models::MovieResponse;
use crate::tmdb::{TmdbApi, TmdbClient};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<dyn TmdbApi>,
    pub fetcher: MovieFetcher,
}

impl AppState {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        Self {
            fetcher: MovieFetcher::new(tmdb.clone()),
            tmdb,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub genre: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryEntry {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TrailerBody {
    pub key: Option<String>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::with_base_url(
        config.api_key.clone(),
        config.base_url.clone(),
    ));
    let app = build_router(AppState::new(tmdb));

    info!("Listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/categories", get(categories))
        .route("/api/trending", get(trending))
        .route("/api/popular", get(popular))
        .route("/api/movies", get(movies))
        .route("/api/movies/:id/trailer", get(trailer))
        .route("/api/search", get(search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn categories() -> Json<Vec<CategoryEntry>> {
    Json(
        Category::NAV
            .into_iter()
            .map(|c| CategoryEntry {
                key: c.key().to_string(),
                label: c.label(),
            })
            .collect(),
    )
}

async fn trending(State(state): State<AppState>) -> Response {
    proxy_feed(&state, Category::Trending, "Failed to fetch trending movies").await
}

async fn popular(State(state): State<AppState>) -> Response {
    proxy_feed(&state, Category::Popular, "Failed to fetch popular movies").await
}

/// Pass the first page of a feed through, reporting upstream failure as 500.
async fn proxy_feed(state: &AppState, category: Category, message: &str) -> Response {
    match state.tmdb.discover(category, 1).await {
        Ok(res) => Json(res).into_response(),
        Err(e) => {
            error!("Error proxying {}: {:#}", category, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response()
        }
    }
}

async fn movies(
    State(state): State<AppState>,
    Query(params): Query<MoviesQuery>,
) -> Json<MovieResponse> {
    let page = params.page.unwrap_or(1).max(1);
    Json(state.fetcher.fetch_movies(params.genre.as_deref(), page).await)
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<MovieResponse> {
    let query = params.query.trim();
    if query.is_empty() {
        return Json(MovieResponse::empty());
    }
    Json(state.fetcher.search_movies(query).await)
}

async fn trailer(State(state): State<AppState>, Path(id): Path<i64>) -> Json<TrailerBody> {
    Json(TrailerBody {
        key: state.fetcher.fetch_movie_trailer(id).await,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
