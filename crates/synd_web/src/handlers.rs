use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use synd_core::{Article, Error};

use crate::AppState;

/// Handler-boundary error mapping: bad input is a 400 with the reason,
/// everything else is a 500 with a generic message. Detail goes to the log,
/// not to the client.
pub enum ApiError {
    BadRequest(String),
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidRequest(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

type ApiResult = std::result::Result<Json<serde_json::Value>, ApiError>;

/// `GET /api/approved-content` — the public read path. Serves the store's
/// published set filtered by the publish policy.
pub async fn approved_content(State(state): State<Arc<AppState>>) -> ApiResult {
    let published = state.store.get_published().await?;
    let content: Vec<Article> = published
        .into_iter()
        .filter(|article| state.policy.allows(article))
        .collect();

    let content_version = state.store.content_version().await?;
    let last_published = state.store.last_published().await?;

    Ok(Json(json!({
        "success": true,
        "total": content.len(),
        "content": content,
        "contentVersion": content_version,
        "lastPublished": last_published,
        "message": format!("Serving {} published articles", content.len()),
    })))
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub content: Article,
    pub action: String,
}

/// `POST /api/save-approved-content` — approve (upsert) one article.
pub async fn save_approved_content(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SaveRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    if request.action != "approve" {
        return Err(ApiError::BadRequest(format!(
            "Unknown action: {:?}",
            request.action
        )));
    }

    let content_id = request.content.id.clone();
    state.store.add_approved(request.content).await?;

    let total_approved = state.store.get_approved().await?.len();
    let total_published = state.store.get_published().await?.len();

    Ok(Json(json!({
        "success": true,
        "contentId": content_id,
        "totalApproved": total_approved,
        "totalPublished": total_published,
        "message": "Content approved",
    })))
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(rename = "approvedContent")]
    pub approved_content: Vec<Article>,
}

/// `POST /api/publish-approved-content` — replace the whole store with the
/// given approved set.
pub async fn publish_approved_content(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PublishRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    state.store.replace_all(request.approved_content).await?;

    let total_approved = state.store.get_approved().await?.len();
    let total_published = state.store.get_published().await?.len();
    let content_version = state.store.content_version().await?;

    Ok(Json(json!({
        "success": true,
        "totalApproved": total_approved,
        "totalPublished": total_published,
        "contentVersion": content_version,
        "message": "Approved content published",
    })))
}

/// `POST /api/refresh-content` — re-fetch every source, merge with the
/// approved set, and republish. The report tells live sources from fallback.
pub async fn refresh_content(State(state): State<Arc<AppState>>) -> ApiResult {
    let result = state.aggregator.refresh().await?;
    let content_version = state.store.content_version().await?;

    Ok(Json(json!({
        "success": true,
        "sources": result.sources,
        "total": result.total,
        "contentVersion": content_version,
        "message": format!("Published {} articles", result.total),
    })))
}

/// `POST /api/clear-content` — wipe the store and its backing file.
pub async fn clear_content(State(state): State<Arc<AppState>>) -> ApiResult {
    state.store.purge().await?;
    Ok(Json(json!({
        "success": true,
        "message": "Content store cleared",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use chrono::{DateTime, Utc};
    use http_body_util::BodyExt;
    use synd_core::types::{ArticleStatus, ContentSource};
    use synd_core::ContentStore;
    use synd_fetchers::Aggregator;
    use synd_store::MemoryStore;
    use tower::ServiceExt;

    use crate::{create_app, AppState, PublishPolicy};

    fn test_app(policy: PublishPolicy) -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new(None));
        let aggregator = Aggregator::new(store.clone());
        let app = create_app(AppState {
            store: store.clone(),
            aggregator: Arc::new(aggregator),
            policy,
        });
        (app, store)
    }

    fn article(id: &str, author: &str, category: &str, published_at: &str) -> Article {
        let published_at: DateTime<Utc> = published_at.parse().unwrap();
        Article {
            id: id.to_string(),
            title: format!("Article {}", id),
            excerpt: "Excerpt".to_string(),
            full_content: "Body".to_string(),
            author: author.to_string(),
            category: category.to_string(),
            source: ContentSource::Curated,
            read_time: "2 min".to_string(),
            date: Article::display_date(&published_at),
            published_at,
            status: ArticleStatus::Pending,
        }
    }

    async fn send_json(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_approve_then_read_roundtrip() {
        let (app, _store) = test_app(PublishPolicy::default());

        let save = serde_json::json!({
            "content": article("x1", "Jane Doe", "Leadership", "2024-01-01T00:00:00Z"),
            "action": "approve",
        });
        let (status, body) = send_json(
            app.clone(),
            Method::POST,
            "/api/save-approved-content",
            Some(save),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["contentId"], "x1");
        assert_eq!(body["totalApproved"], 1);
        assert_eq!(body["totalPublished"], 1);

        let (status, body) = send_json(app, Method::GET, "/api/approved-content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 1);
        assert_eq!(body["content"][0]["id"], "x1");
    }

    #[tokio::test]
    async fn test_publish_replaces_and_sorts() {
        let (app, store) = test_app(PublishPolicy::default());
        store
            .add_approved(article("old", "Jane Doe", "Blog", "2023-01-01T00:00:00Z"))
            .await
            .unwrap();

        let publish = serde_json::json!({
            "approvedContent": [
                article("a", "Jane Doe", "Blog", "2024-01-01T00:00:00Z"),
                article("b", "Jane Doe", "Blog", "2024-02-01T00:00:00Z"),
            ],
        });
        let (status, body) = send_json(
            app,
            Method::POST,
            "/api/publish-approved-content",
            Some(publish),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalApproved"], 2);
        assert_eq!(body["totalPublished"], 2);
        assert_eq!(body["contentVersion"], 1);

        let published = store.get_published().await.unwrap();
        let ids: Vec<&str> = published.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_read_applies_publish_policy() {
        let policy = PublishPolicy {
            author: Some("Jane Doe".to_string()),
            excluded_categories: vec!["Tips".to_string()],
        };
        let (app, store) = test_app(policy);
        store
            .replace_all(vec![
                article("keep", "Jane Doe", "Leadership", "2024-03-01T00:00:00Z"),
                article("tip", "Jane Doe", "Tips", "2024-02-01T00:00:00Z"),
                article("guest", "Someone Else", "Leadership", "2024-01-01T00:00:00Z"),
            ])
            .await
            .unwrap();

        let (status, body) = send_json(app, Method::GET, "/api/approved-content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["content"][0]["id"], "keep");
    }

    #[tokio::test]
    async fn test_unknown_action_is_bad_request() {
        let (app, _store) = test_app(PublishPolicy::default());
        let save = serde_json::json!({
            "content": article("x1", "Jane Doe", "Blog", "2024-01-01T00:00:00Z"),
            "action": "reject",
        });
        let (status, body) = send_json(
            app,
            Method::POST,
            "/api/save-approved-content",
            Some(save),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _store) = test_app(PublishPolicy::default());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/save-approved-content")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not valid json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let (app, _store) = test_app(PublishPolicy::default());
        let (status, _) = send_json(app, Method::GET, "/api/clear-content", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let (app, store) = test_app(PublishPolicy::default());
        store
            .add_approved(article("x1", "Jane Doe", "Blog", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        let (status, body) = send_json(app, Method::POST, "/api/clear-content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(store.get_approved().await.unwrap().is_empty());
        assert!(store.get_published().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_with_no_fetchers_keeps_approved() {
        let (app, store) = test_app(PublishPolicy::default());
        store
            .add_approved(article("x1", "Jane Doe", "Blog", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        let (status, body) = send_json(app, Method::POST, "/api/refresh-content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 1);
        assert_eq!(store.get_published().await.unwrap().len(), 1);
    }
}
