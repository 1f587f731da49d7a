//! Browse state: the active category's movie list with its pagination cursor,
//! search results, and the movie selected for the detail modal.
//!
//! [`MovieStore`] is a cheap handle; clones share one state. Each operation
//! commits its changes in a single update, so subscribers never observe a
//! half-applied result. No lock is held while an upstream call is pending.

use crate::catalog::Category;
use crate::models::Movie;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the store gets its data. Errors are recorded in [`MovieState::error`].
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn movies(&self, category: Category, page: u32) -> Result<Vec<Movie>>;
    async fn search(&self, query: &str) -> Result<Vec<Movie>>;
    async fn trailer(&self, movie_id: i64) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    FetchingCategory,
    FetchingNextPage,
    Searching,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieState {
    pub movies: Vec<Movie>,
    pub active_category: Option<Category>,
    pub current_page: u32,
    pub has_more: bool,
    pub load_state: LoadState,
    pub error: Option<String>,
    pub search_results: Vec<Movie>,
    pub selected_movie: Option<Movie>,
    pub selected_trailer_key: Option<String>,
    pub modal_open: bool,
}

impl Default for MovieState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            active_category: None,
            current_page: 1,
            has_more: true,
            load_state: LoadState::Idle,
            error: None,
            search_results: Vec::new(),
            selected_movie: None,
            selected_trailer_key: None,
            modal_open: false,
        }
    }
}

impl MovieState {
    pub fn is_loading(&self) -> bool {
        self.load_state != LoadState::Idle
    }

    /// Whether a scroll-triggered "load more" should be issued.
    pub fn can_load_more(&self, search_active: bool) -> bool {
        !self.is_loading() && self.has_more && !search_active
    }
}

#[derive(Clone)]
pub struct MovieStore {
    source: Arc<dyn MovieSource>,
    state: Arc<watch::Sender<MovieState>>,
}

impl MovieStore {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        let (tx, _rx) = watch::channel(MovieState::default());
        Self {
            source,
            state: Arc::new(tx),
        }
    }

    pub fn snapshot(&self) -> MovieState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MovieState> {
        self.state.subscribe()
    }

    /// Load the first page of a category, or the next page of it when
    /// `load_more` is set. Absent or unknown keys mean trending.
    ///
    /// Returns immediately without touching the network when a load is
    /// already in flight, when the category is already showing results, or
    /// when loading more past the last non-empty page. Loading more only
    /// continues the active category; naming a different one is ignored.
    pub async fn fetch_movies_by_genre(&self, key: Option<&str>, load_more: bool) {
        let requested = key.map(|k| Category::resolve(Some(k)));
        let mut plan = None;
        self.state.send_if_modified(|s| {
            let target = match (load_more, s.active_category) {
                (true, Some(active)) => {
                    if requested.is_some_and(|r| r != active) {
                        return false;
                    }
                    active
                }
                _ => requested.unwrap_or(Category::Trending),
            };
            if s.is_loading()
                || (!load_more && s.active_category == Some(target) && !s.movies.is_empty())
                || (load_more && !s.has_more)
            {
                return false;
            }
            if !load_more && s.active_category != Some(target) {
                s.movies.clear();
                s.current_page = 1;
                s.has_more = true;
            }
            s.active_category = Some(target);
            let page = if load_more { s.current_page + 1 } else { 1 };
            s.load_state = if load_more {
                LoadState::FetchingNextPage
            } else {
                LoadState::FetchingCategory
            };
            s.error = None;
            plan = Some((target, page));
            true
        });
        let Some((category, page)) = plan else {
            debug!(?key, load_more, "Skipping category fetch");
            return;
        };

        info!(category = %category, page, "Fetching movies");
        let result = self.source.movies(category, page).await;

        self.state.send_modify(|s| {
            s.load_state = LoadState::Idle;
            if s.active_category != Some(category) {
                debug!(category = %category, "Discarding response for inactive category");
                return;
            }
            let fetched = match result {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(category = %category, page, "Failed to fetch movies: {:#}", e);
                    s.error = Some(e.to_string());
                    return;
                }
            };
            s.has_more = !fetched.is_empty();
            if load_more {
                s.movies.extend(fetched);
            } else {
                s.movies = fetched;
            }
            dedupe_by_id(&mut s.movies);
            s.current_page = page;
        });
    }

    /// Replace the search results. Search has no "load more". Like category
    /// fetches, a search is skipped while any load is in flight.
    pub async fn search_movies(&self, query: &str) {
        let started = self.state.send_if_modified(|s| {
            if s.is_loading() {
                return false;
            }
            s.load_state = LoadState::Searching;
            s.error = None;
            true
        });
        if !started {
            debug!(query, "Skipping search while another load is in flight");
            return;
        }

        info!(query, "Searching movies");
        let result = self.source.search(query).await;

        self.state.send_modify(|s| {
            s.load_state = LoadState::Idle;
            match result {
                Ok(results) => {
                    s.search_results = results;
                    s.current_page = 1;
                    s.has_more = false;
                }
                Err(e) => {
                    warn!(query, "Failed to search movies: {:#}", e);
                    s.error = Some(e.to_string());
                }
            }
        });
    }

    /// Mark a category as active without fetching. `None` clears it.
    pub fn set_selected_genre(&self, key: Option<&str>) {
        let category = key.map(|k| Category::resolve(Some(k)));
        self.state.send_modify(|s| s.active_category = category);
    }

    /// Leave search mode so category browsing can paginate again.
    pub fn clear_search_results(&self) {
        self.state.send_modify(|s| {
            s.search_results.clear();
            s.current_page = 1;
            s.has_more = true;
        });
    }

    /// Select a movie for the detail view and look up its trailer. A trailer
    /// that arrives after the selection changed is dropped.
    pub async fn set_selected_movie(&self, movie: Option<Movie>) {
        let movie_id = movie.as_ref().map(|m| m.id);
        self.state.send_modify(|s| {
            s.selected_movie = movie;
            s.selected_trailer_key = None;
        });
        let Some(movie_id) = movie_id else {
            return;
        };

        let trailer = match self.source.trailer(movie_id).await {
            Ok(trailer) => trailer,
            Err(e) => {
                warn!(movie_id, "Failed to fetch trailer: {:#}", e);
                None
            }
        };

        self.state.send_if_modified(|s| {
            if s.selected_movie.as_ref().map(|m| m.id) != Some(movie_id) {
                debug!(movie_id, "Dropping trailer for deselected movie");
                return false;
            }
            s.selected_trailer_key = trailer;
            true
        });
    }

    pub fn open_modal(&self) {
        self.state.send_modify(|s| s.modal_open = true);
    }

    pub fn close_modal(&self) {
        self.state.send_modify(|s| {
            s.modal_open = false;
            s.selected_movie = None;
            s.selected_trailer_key = None;
        });
    }
}

/// Keep the first occurrence of each id, in first-seen order.
fn dedupe_by_id(movies: &mut Vec<Movie>) {
    let mut seen = HashSet::with_capacity(movies.len());
    movies.retain(|m| seen.insert(m.id));
}
