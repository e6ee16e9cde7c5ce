pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/catalog", get(catalog::handle_catalog_status))
        .route("/api/v1/catalog/search", get(catalog::handle_search))
        .route(
            "/api/v1/catalog/postings/:id",
            get(catalog::handle_get_posting),
        )
        .route("/api/v1/catalog/reload", post(catalog::handle_reload))
        // Recommendation API
        .route(
            "/api/v1/recommendations",
            post(recommendation::handle_recommend),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::handlers::{CatalogStatusResponse, SearchResponse};
    use crate::catalog::index::tests::posting;
    use crate::catalog::index::CatalogIndex;
    use crate::catalog::seed::seed_postings;
    use crate::config::Config;
    use crate::models::posting::JobPosting;
    use crate::recommendation::handlers::RecommendResponse;

    fn test_state() -> AppState {
        state_with(seed_postings())
    }

    fn state_with(postings: Vec<JobPosting>) -> AppState {
        let catalog = Arc::new(CatalogIndex::new());
        catalog.load(postings).unwrap();
        AppState {
            catalog,
            db: None,
            config: Config::from_lookup(|_| None).unwrap(),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state()).oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillmatch-api");
    }

    #[tokio::test]
    async fn test_catalog_status_reports_seed() {
        let response = build_router(test_state())
            .oneshot(get_request("/api/v1/catalog"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status: CatalogStatusResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(status.version, 1);
        assert_eq!(status.posting_count, 6);
        assert_eq!(status.source, "builtin");
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let response = build_router(test_state())
            .oneshot(get_request("/api/v1/catalog/search?q=React"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let result: SearchResponse = serde_json::from_value(body_json(response).await).unwrap();
        let titles: Vec<&str> = result.postings.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Frontend Developer", "Full Stack Engineer"]);
    }

    #[tokio::test]
    async fn test_search_without_query_is_empty() {
        let response = build_router(test_state())
            .oneshot(get_request("/api/v1/catalog/search"))
            .await
            .unwrap();
        let result: SearchResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert!(result.postings.is_empty());
    }

    #[tokio::test]
    async fn test_get_posting_and_not_found() {
        let app = build_router(test_state());

        let response = app.clone().oneshot(get_request("/api/v1/catalog/postings/seed-5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["title"], "DevOps Engineer");

        let response = app.oneshot(get_request("/api/v1/catalog/postings/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reload_bumps_version() {
        let response = build_router(test_state())
            .oneshot(post_json("/api/v1/catalog/reload", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status: CatalogStatusResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(status.version, 2);
    }

    #[tokio::test]
    async fn test_recommendations_ranked_and_capped() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["React", "TypeScript", "Python", "SQL"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: RecommendResponse = serde_json::from_value(body_json(response).await).unwrap();
        let titles: Vec<&str> = result.jobs.iter().map(|j| j.posting.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Frontend Developer",
                "Full Stack Engineer",
                "Data Scientist",
                "DevOps Engineer"
            ]
        );
        assert_eq!(result.jobs[0].score, 40);
        assert_eq!(result.jobs[3].score, 20);
        assert_eq!(result.catalog_version, 1);
        assert_eq!(
            result.query_terms_used,
            vec!["react", "typescript", "python", "sql"]
        );
    }

    #[tokio::test]
    async fn test_recommendations_respect_limit() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["React", "Python"], "limit": 2 }),
            ))
            .await
            .unwrap();
        let result: RecommendResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(result.jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_recommendations_empty_skills() {
        let response = build_router(test_state())
            .oneshot(post_json("/api/v1/recommendations", json!({ "skills": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let result: RecommendResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert!(result.jobs.is_empty());
        assert!(result.query_terms_used.is_empty());
    }

    #[tokio::test]
    async fn test_recommendations_reject_null_skill() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["React", null] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_recommendations_reject_zero_limit() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["React"], "limit": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommendations_reject_malformed_skills_with_envelope() {
        let app = build_router(test_state());
        let bodies = [
            json!({ "skills": null }),
            json!({}),
            json!({ "skills": "react" }),
            json!({ "skills": ["react"], "seed_terms": [null] }),
        ];

        for body in bodies {
            let response = app
                .clone()
                .oneshot(post_json("/api/v1/recommendations", body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
            let error = body_json(response).await;
            assert_eq!(error["error"]["code"], "VALIDATION_ERROR", "body {body}");
        }
    }

    #[tokio::test]
    async fn test_recommendations_company_cap_from_request() {
        let app = build_router(state_with(vec![
            posting("a1", "Rust Engineer", "Acme", &["rust"]),
            posting("a2", "Rust Engineer", "Acme", &["rust"]),
            posting("b1", "Systems Engineer", "Beta", &["rust", "go"]),
            posting("c1", "Platform Engineer", "Gamma", &["rust", "go", "sql"]),
        ]));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["Rust"], "limit": 3 }),
            ))
            .await
            .unwrap();
        let result: RecommendResponse = serde_json::from_value(body_json(response).await).unwrap();
        let ids: Vec<&str> = result.jobs.iter().map(|j| j.posting.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1"]);

        let response = app
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["Rust"], "limit": 3, "company_diversity_cap": 1 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let result: RecommendResponse = serde_json::from_value(body_json(response).await).unwrap();
        let ids: Vec<&str> = result.jobs.iter().map(|j| j.posting.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b1", "c1"]);
        assert_eq!(result.jobs[2].score, 33);
    }

    #[tokio::test]
    async fn test_recommendations_seed_terms_are_searched_after_skills() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/recommendations",
                json!({ "skills": ["React"], "seed_terms": [" Designer ", "react"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: RecommendResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(result.query_terms_used, vec!["react", "designer"]);
        let titles: Vec<&str> = result.jobs.iter().map(|j| j.posting.title.as_str()).collect();
        assert_eq!(titles, vec!["Frontend Developer", "Full Stack Engineer"]);
    }
}
