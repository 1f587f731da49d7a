use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use marquee::app::{build_router, AppState, CategoryEntry, TrailerBody};
use marquee::models::{MovieResponse, Video};
use marquee::tmdb::TmdbApi;
use marquee::Category;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

#[derive(Default)]
struct FakeTmdb {
    fail: bool,
    discovered: Mutex<Vec<(Category, u32)>>,
    searched: Mutex<Vec<String>>,
}

fn page(ids: &[i64]) -> MovieResponse {
    serde_json::from_value(json!({
        "results": ids.iter().map(|id| json!({ "id": id, "title": format!("Movie {id}") })).collect::<Vec<_>>()
    }))
    .unwrap()
}

#[async_trait::async_trait]
impl TmdbApi for FakeTmdb {
    async fn discover(&self, category: Category, page_no: u32) -> anyhow::Result<MovieResponse> {
        self.discovered.lock().unwrap().push((category, page_no));
        if self.fail {
            anyhow::bail!("upstream down");
        }
        Ok(match category {
            Category::Trending => page(&[1, 2, 3]),
            Category::Popular => page(&[10, 11]),
            _ => page(&[100 + page_no as i64]),
        })
    }

    async fn search(&self, query: &str) -> anyhow::Result<MovieResponse> {
        self.searched.lock().unwrap().push(query.to_string());
        if self.fail {
            anyhow::bail!("upstream down");
        }
        Ok(page(&[42]))
    }

    async fn videos(&self, movie_id: i64) -> anyhow::Result<Vec<Video>> {
        if self.fail {
            anyhow::bail!("upstream down");
        }
        Ok(vec![
            Video {
                key: format!("teaser-{movie_id}"),
                site: "YouTube".to_string(),
                video_type: "Teaser".to_string(),
            },
            Video {
                key: format!("trailer-{movie_id}"),
                site: "YouTube".to_string(),
                video_type: "Trailer".to_string(),
            },
        ])
    }
}

fn app_with(tmdb: FakeTmdb) -> (Router, Arc<FakeTmdb>) {
    let tmdb = Arc::new(tmdb);
    (build_router(AppState::new(tmdb.clone())), tmdb)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let res = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn result_ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = app_with(FakeTmdb::default());
    let res = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_navigation_categories() {
    let (app, _) = app_with(FakeTmdb::default());
    let (status, body) = get(app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let entries: Vec<CategoryEntry> = serde_json::from_value(body).unwrap();
    assert_eq!(entries.len(), Category::NAV.len());
    assert_eq!(
        entries[0],
        CategoryEntry {
            key: "fetchTrending".to_string(),
            label: "Trending".to_string(),
        }
    );
    assert!(entries.iter().all(|e| e.key != "fetchPopular"));
}

#[tokio::test]
async fn proxies_trending_and_popular() {
    let (app, tmdb) = app_with(FakeTmdb::default());
    let (status, body) = get(app.clone(), "/api/trending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![1, 2, 3]);

    let (status, body) = get(app, "/api/popular").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![10, 11]);
    assert_eq!(
        *tmdb.discovered.lock().unwrap(),
        vec![(Category::Trending, 1), (Category::Popular, 1)]
    );
}

#[tokio::test]
async fn proxy_failure_is_a_server_error() {
    let (app, _) = app_with(FakeTmdb {
        fail: true,
        ..Default::default()
    });
    let (status, body) = get(app.clone(), "/api/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch trending movies");

    let (status, body) = get(app, "/api/popular").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch popular movies");
}

#[tokio::test]
async fn movies_route_resolves_genre_and_page() {
    let (app, tmdb) = app_with(FakeTmdb::default());
    let (status, body) = get(app.clone(), "/api/movies?genre=fetchHorrorMovies&page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![103]);

    get(app.clone(), "/api/movies?genre=nonexistent-key").await;
    get(app, "/api/movies?page=0").await;
    assert_eq!(
        *tmdb.discovered.lock().unwrap(),
        vec![
            (Category::Horror, 3),
            (Category::Trending, 1),
            (Category::Trending, 1)
        ]
    );
}

#[tokio::test]
async fn browse_routes_degrade_to_empty() {
    let (app, _) = app_with(FakeTmdb {
        fail: true,
        ..Default::default()
    });
    let (status, body) = get(app.clone(), "/api/movies?genre=fetchComedyMovies").await;
    assert_eq!(status, StatusCode::OK);
    assert!(result_ids(&body).is_empty());

    let (status, body) = get(app.clone(), "/api/search?query=alien").await;
    assert_eq!(status, StatusCode::OK);
    assert!(result_ids(&body).is_empty());

    let (status, body) = get(app, "/api/movies/603/trailer").await;
    assert_eq!(status, StatusCode::OK);
    let trailer: TrailerBody = serde_json::from_value(body).unwrap();
    assert_eq!(trailer.key, None);
}

#[tokio::test]
async fn search_skips_blank_queries() {
    let (app, tmdb) = app_with(FakeTmdb::default());
    let (_, body) = get(app.clone(), "/api/search?query=%20%20").await;
    assert!(result_ids(&body).is_empty());
    let (_, body) = get(app.clone(), "/api/search").await;
    assert!(result_ids(&body).is_empty());
    assert!(tmdb.searched.lock().unwrap().is_empty());

    let (_, body) = get(app, "/api/search?query=blade%20runner").await;
    assert_eq!(result_ids(&body), vec![42]);
    assert_eq!(*tmdb.searched.lock().unwrap(), vec!["blade runner"]);
}

#[tokio::test]
async fn trailer_route_picks_youtube_trailer() {
    let (app, _) = app_with(FakeTmdb::default());
    let (status, body) = get(app, "/api/movies/603/trailer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "key": "trailer-603" }));
}
