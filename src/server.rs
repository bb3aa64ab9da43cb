use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::SqliteRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<SqliteRepository>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<SqliteRepository>) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let calc_routes = Router::new()
        .route("/", get(crate::calc::home))
        .route("/incr/:x", get(crate::calc::incr))
        .route("/add/:x/:y", get(crate::calc::add))
        .route("/pow/:x/:e", get(crate::calc::pow));

    let movie_routes = Router::new()
        .route("/movies", get(crate::movies::list_movies))
        .route("/movies/top10", get(crate::movies::top10))
        .route("/movies/topNwithM", get(crate::movies::top_n_with_m))
        .route(
            "/movies/topNwithM/:genre",
            get(crate::movies::top_n_with_m_by_genre),
        );

    Router::new()
        .merge(calc_routes)
        .merge(movie_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::testing::{memory_repo, FIXTURE};
    use axum::{body::Body, http::Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app(script: Option<&str>) -> Router {
        let repo = memory_repo(script).await;
        build_router(AppState::new(Config::default(), Arc::new(repo)))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    fn titles(body: &Value) -> Vec<&str> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["Title"].as_str().unwrap())
            .collect()
    }

    fn assert_ranked(body: &Value, max_len: usize, min_reviews: i64) {
        assert_eq!(body["message"], "success");
        let data = body["data"].as_array().unwrap();
        assert!(data.len() <= max_len, "{} > {}", data.len(), max_len);
        for m in data {
            assert!(m["NumReviews"].as_i64().unwrap() >= min_reviews);
        }
        for pair in data.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ra, rb) = (a["AvgRating"].as_f64().unwrap(), b["AvgRating"].as_f64().unwrap());
            assert!(ra > rb || (ra == rb && a["Title"].as_str() <= b["Title"].as_str()));
        }
    }

    #[tokio::test]
    async fn test_home_page() {
        let (status, body) = get(app(None).await, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("we are a movielens service!"));
    }

    #[tokio::test]
    async fn test_incr() {
        for (x, expected) in [("0", "1"), ("41", "42"), ("-5", "-4"), ("-1", "0")] {
            let (status, body) = get(app(None).await, &format!("/incr/{}", x)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn test_incr_rejects_non_integers() {
        for x in ["abc", "1.5", "12abc", "%20"] {
            let (status, body) = get(app(None).await, &format!("/incr/{}", x)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", x);
            assert!(!body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_incr_overflow() {
        let (status, body) = get(app(None).await, &format!("/incr/{}", i64::MAX)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("overflows"));
    }

    #[tokio::test]
    async fn test_add_and_pow_not_implemented() {
        let (status, body) = get(app(None).await, "/add/3/4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/add not implemented!");

        let (status, body) = get(app(None).await, "/pow/2/10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/pow not implemented!");

        let (_, body) = get(app(None).await, "/pow/x/y").await;
        assert_eq!(body, "/pow not implemented!");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get(app(None).await, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_movies_ordered_by_id() {
        let (status, body) = get_json(app(Some(FIXTURE)).await, "/movies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "success");
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 16);
        let ids: Vec<i64> = data.iter().map(|m| m["Movie_ID"].as_i64().unwrap()).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        assert_eq!(data[0]["Release_Year"], 1994);
        assert_eq!(data[6]["Release_Year"], Value::Null);
    }

    #[tokio::test]
    async fn test_top10() {
        let (status, body) = get_json(app(Some(FIXTURE)).await, "/movies/top10").await;
        assert_eq!(status, StatusCode::OK);
        assert_ranked(&body, 10, 100);
        let titles = titles(&body);
        assert_eq!(titles.len(), 10);
        // Bravo and Charlie tie on 4.0 and are ordered by title.
        assert_eq!(&titles[..4], &["Alpha", "Bravo", "Charlie", "Film 16"]);
        assert!(body["data"][0].get("Genre_Name").is_none());
    }

    #[tokio::test]
    async fn test_top_n_with_m() {
        let (status, body) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM?N=3&M=50").await;
        assert_eq!(status, StatusCode::OK);
        assert_ranked(&body, 3, 50);
        assert_eq!(titles(&body), vec!["Delta", "Alpha", "Bravo"]);
        assert_eq!(body["data"][0]["NumReviews"], 60);
        assert_eq!(body["data"][1]["AvgRating"], 4.5);
    }

    #[tokio::test]
    async fn test_top_n_with_m_defaults() {
        let (_, implicit) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM").await;
        let (_, explicit) =
            get_json(app(Some(FIXTURE)).await, "/movies/topNwithM?N=10&M=100").await;
        let (_, garbage) =
            get_json(app(Some(FIXTURE)).await, "/movies/topNwithM?N=ten&M=lots").await;
        let (_, top10) = get_json(app(Some(FIXTURE)).await, "/movies/top10").await;
        assert_eq!(implicit, explicit);
        assert_eq!(implicit, garbage);
        assert_eq!(implicit, top10);
    }

    #[tokio::test]
    async fn test_top_n_with_m_unbounded_values() {
        let (status, body) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM?N=0&M=0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());

        // SQLite treats a negative LIMIT as no limit.
        let (_, body) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM?N=-1&M=0").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_top_n_with_m_by_genre() {
        let (status, body) =
            get_json(app(Some(FIXTURE)).await, "/movies/topNwithM/drama?N=5&M=50").await;
        assert_eq!(status, StatusCode::OK);
        assert_ranked(&body, 5, 50);
        assert_eq!(titles(&body), vec!["Alpha", "Bravo", "Echo"]);
        for m in body["data"].as_array().unwrap() {
            assert_eq!(m["Genre_Name"], "Drama");
        }
    }

    #[tokio::test]
    async fn test_genre_defaults_and_wildcards() {
        let (_, body) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM/Drama").await;
        assert_eq!(titles(&body), vec!["Alpha", "Bravo"]);

        let (_, body) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM/sci%25?M=50").await;
        assert_eq!(titles(&body), vec!["Delta"]);
        assert_eq!(body["data"][0]["Genre_Name"], "Science Fiction");

        let (_, body) = get_json(app(Some(FIXTURE)).await, "/movies/topNwithM/Western?M=0").await;
        assert_eq!(body["message"], "success");
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_database_errors_use_envelope() {
        for uri in [
            "/movies",
            "/movies/top10",
            "/movies/topNwithM?N=5",
            "/movies/topNwithM/drama",
        ] {
            let (status, body) = get_json(app(None).await, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_ne!(body["message"], "success");
            assert!(body["message"].as_str().unwrap().contains("no such table"));
            assert_eq!(body["data"], Value::Array(Vec::new()));
        }
    }
}
