pub mod app;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod models;
pub mod store;
pub mod tmdb;

pub use catalog::Category;
pub use fetch::MovieFetcher;
pub use models::{Movie, MovieResponse};
pub use store::{MovieSource, MovieState, MovieStore};
