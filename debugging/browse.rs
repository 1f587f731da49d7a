//! Drive the browse store against live TMDB and print what a view would render.
//! Usage:
//!   cargo run --bin browse -- category [key] [pages]
//!   cargo run --bin browse -- search <query...>
//!   cargo run --bin browse -- pick <key> <index>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use marquee::config::Config;
use marquee::models::{trailer_embed_url, ImageSize};
use marquee::tmdb::TmdbClient;
use marquee::{Category, Movie, MovieFetcher, MovieStore};
use std::env;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Category,
    Search,
    Pick,
}

impl FromStr for Command {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "category" => Ok(Command::Category),
            "search" => Ok(Command::Search),
            "pick" => Ok(Command::Pick),
            _ => Err(anyhow::anyhow!(
                "command must be 'category', 'search' or 'pick'"
            )),
        }
    }
}

fn print_movie(index: usize, movie: &Movie) {
    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    println!(
        "{:>3}. [{}] {} ({}) {}% {}",
        index,
        movie.id,
        movie.display_title(),
        year,
        movie.rating_percent(),
        "*".repeat(movie.star_count() as usize)
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    let config = Config::from_env()?;
    let api = Arc::new(TmdbClient::with_base_url(config.api_key, config.base_url));
    let store = MovieStore::new(Arc::new(MovieFetcher::new(api)));

    let mut args = env::args().skip(1);
    let command: Command = args
        .next()
        .context("missing command (category | search | pick)")?
        .parse()?;

    match command {
        Command::Category => {
            let key = args.next();
            let pages: u32 = match args.next() {
                Some(p) => p.parse().context("pages must be a number")?,
                None => 1,
            };
            store.fetch_movies_by_genre(key.as_deref(), false).await;
            for _ in 1..pages {
                if !store.snapshot().can_load_more(false) {
                    break;
                }
                store.fetch_movies_by_genre(None, true).await;
            }
            let state = store.snapshot();
            let category = state.active_category.unwrap_or(Category::Trending);
            println!(
                "{} - page {} - {} movies{}",
                category.label(),
                state.current_page,
                state.movies.len(),
                if state.has_more { "" } else { " (end)" }
            );
            for (i, movie) in state.movies.iter().enumerate() {
                print_movie(i, movie);
            }
        }
        Command::Search => {
            let query = args.collect::<Vec<_>>().join(" ");
            if query.trim().is_empty() {
                bail!("search needs a query");
            }
            store.search_movies(&query).await;
            let state = store.snapshot();
            println!("Search results for \"{}\": {}", query, state.search_results.len());
            for (i, movie) in state.search_results.iter().enumerate() {
                print_movie(i, movie);
            }
        }
        Command::Pick => {
            let key = args.next().context("pick needs a category key")?;
            let index: usize = args
                .next()
                .context("pick needs an index")?
                .parse()
                .context("index must be a number")?;
            store.fetch_movies_by_genre(Some(&key), false).await;
            let Some(movie) = store.snapshot().movies.get(index).cloned() else {
                bail!("no movie at index {}", index);
            };
            store.set_selected_movie(Some(movie)).await;
            store.open_modal();
            let state = store.snapshot();
            let Some(selected) = state.selected_movie.as_ref() else {
                bail!("selection was cleared");
            };
            println!("{}", selected.display_title());
            println!("{}", selected.overview);
            if let Some(url) = selected.backdrop_url(ImageSize::Original) {
                println!("Backdrop: {}", url);
            }
            match state.selected_trailer_key.as_deref() {
                Some(key) => println!("Trailer: {}", trailer_embed_url(key)),
                None => println!("Trailer: none"),
            }
            store.close_modal();
        }
    }
    Ok(())
}
