//! Upstream calls wrapped with the browse policy: failures are logged and
//! degrade to an empty result list (or no trailer). Nothing is retried.

use crate::catalog::Category;
use crate::models::{select_trailer, Movie, MovieResponse};
use crate::store::MovieSource;
use crate::tmdb::TmdbApi;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct MovieFetcher {
    api: Arc<dyn TmdbApi>,
}

impl MovieFetcher {
    pub fn new(api: Arc<dyn TmdbApi>) -> Self {
        Self { api }
    }

    /// Fetch one page of a category. Unknown or absent keys fetch trending.
    pub async fn fetch_movies(&self, key: Option<&str>, page: u32) -> MovieResponse {
        self.fetch_category(Category::resolve(key), page).await
    }

    pub async fn fetch_category(&self, category: Category, page: u32) -> MovieResponse {
        match self.api.discover(category, page).await {
            Ok(res) => res,
            Err(e) => {
                warn!("Error fetching movies: {:#}", e);
                MovieResponse::empty()
            }
        }
    }

    pub async fn search_movies(&self, query: &str) -> MovieResponse {
        match self.api.search(query).await {
            Ok(res) => res,
            Err(e) => {
                warn!("Error searching movies: {:#}", e);
                MovieResponse::empty()
            }
        }
    }

    pub async fn fetch_movie_trailer(&self, movie_id: i64) -> Option<String> {
        match self.api.videos(movie_id).await {
            Ok(videos) => select_trailer(&videos),
            Err(e) => {
                warn!(movie_id, "Error fetching trailer: {:#}", e);
                None
            }
        }
    }
}

#[async_trait]
impl MovieSource for MovieFetcher {
    async fn movies(&self, category: Category, page: u32) -> Result<Vec<Movie>> {
        Ok(self.fetch_category(category, page).await.results)
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>> {
        Ok(self.search_movies(query).await.results)
    }

    async fn trailer(&self, movie_id: i64) -> Result<Option<String>> {
        Ok(self.fetch_movie_trailer(movie_id).await)
    }
}
