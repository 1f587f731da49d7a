use crate::catalog::Category;
use crate::models::{MovieResponse, Video, VideoResponse};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";

/// Raw upstream calls. Every failure is reported; callers decide how to degrade.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn discover(&self, category: Category, page: u32) -> Result<MovieResponse>;
    async fn search(&self, query: &str) -> Result<MovieResponse>;
    async fn videos(&self, movie_id: i64) -> Result<Vec<Video>>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, TMDB_BASE)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn category_url(&self, category: Category, page: u32) -> String {
        format!(
            "{}{}&api_key={}&page={page}",
            self.base_url,
            category.query_template(),
            self.api_key
        )
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        )
    }

    pub fn videos_url(&self, movie_id: i64) -> String {
        format!(
            "{}/movie/{movie_id}/videos?api_key={}&language=en-US",
            self.base_url, self.api_key
        )
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("TMDB returned {} -> {}", status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn discover(&self, category: Category, page: u32) -> Result<MovieResponse> {
        debug!(category = %category, page, "TMDB list request");
        let url = self.category_url(category, page);
        self.get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch {} page {}", category, page))
    }

    async fn search(&self, query: &str) -> Result<MovieResponse> {
        debug!(query, "TMDB search request");
        let url = self.search_url(query);
        self.get_json(&url)
            .await
            .with_context(|| format!("Failed to search movies for '{}'", query))
    }

    async fn videos(&self, movie_id: i64) -> Result<Vec<Video>> {
        let url = self.videos_url(movie_id);
        let data: VideoResponse = self
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch videos for movie {}", movie_id))?;
        Ok(data.results)
    }
}
