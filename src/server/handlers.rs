use super::types::{
    ErrorResponse, IdeasRequest, IdeasResponse, ThumbnailErrorResponse, ThumbnailRequest,
    ThumbnailResponse,
};
use super::AppState;
use crate::ai::{ConceptService, FallbackRunner, GeminiClient, GeminiConceptClient};
use crate::storage::{StorageClient, StorageService};
use crate::thumbnail::ThumbnailGenerator;
use crate::{Error, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine as _;
use std::sync::Arc;
use tracing::error;

fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::MissingInput(_) | Error::MissingCredential(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn gemini_client(state: &AppState, api_key: String) -> Arc<GeminiClient> {
    let mut client = GeminiClient::new_with_client(api_key, state.http.clone());
    if let Some(base_url) = &state.config.gemini_base_url {
        client = client.with_base_url(base_url.clone());
    }
    Arc::new(client)
}

fn resolve_api_key(state: &AppState, supplied: Option<String>) -> Result<String> {
    supplied
        .or_else(|| state.config.gemini_api_key.clone())
        .ok_or_else(|| Error::MissingCredential("Gemini API key".to_string()))
}

pub async fn generate_ideas(
    State(state): State<AppState>,
    Json(body): Json<IdeasRequest>,
) -> Response {
    match ideas(&state, body).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Generate ideas failed: {}", e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn ideas(state: &AppState, body: IdeasRequest) -> Result<IdeasResponse> {
    let title = body.title.unwrap_or_default();
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::MissingInput("title".to_string()));
    }

    let api_key = resolve_api_key(state, body.api_key)?;
    let service = GeminiConceptClient::new(
        gemini_client(state, api_key),
        state.config.idea_model.clone(),
    );

    let concepts = service.generate_concepts(title).await?;

    Ok(IdeasResponse {
        success: true,
        count: concepts.len(),
        concepts,
    })
}

pub async fn generate_thumbnail(
    State(state): State<AppState>,
    Json(body): Json<ThumbnailRequest>,
) -> Response {
    let mut debug = Vec::new();

    match thumbnail(&state, body, &mut debug).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Generate thumbnail failed: {}", e);
            (
                error_status(&e),
                Json(ThumbnailErrorResponse {
                    error: e.to_string(),
                    debug,
                }),
            )
                .into_response()
        }
    }
}

async fn thumbnail(
    state: &AppState,
    body: ThumbnailRequest,
    debug: &mut Vec<String>,
) -> Result<ThumbnailResponse> {
    let concept = body
        .concept
        .ok_or_else(|| Error::MissingInput("concept".to_string()))?;

    let api_key = resolve_api_key(state, body.api_key)?;
    let runner = FallbackRunner::gemini(
        gemini_client(state, api_key),
        &state.config.image_models,
    );

    let storage_url = body.storage_url.or_else(|| state.config.storage_url.clone());
    let storage_key = body.storage_key.or_else(|| state.config.storage_key.clone());
    let storage: Option<Box<dyn StorageService>> = match (storage_url, storage_key) {
        (Some(url), Some(key)) => Some(Box::new(StorageClient::new_with_client(
            url,
            key,
            state.config.storage_bucket.clone(),
            state.http.clone(),
        ))),
        _ => None,
    };

    let generator = ThumbnailGenerator::new(runner, storage);
    let project_id = body.project_id.unwrap_or_else(|| "default".to_string());

    let thumbnail = generator.generate(&concept, &project_id, debug).await?;

    Ok(ThumbnailResponse {
        success: true,
        image_data: format!(
            "data:{};base64,{}",
            thumbnail.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&thumbnail.bytes)
        ),
        image_url: thumbnail.image_url,
        model: thumbnail.model,
        concept: thumbnail.concept,
        debug: std::mem::take(debug),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_concept, Config};
    use crate::server::router;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(gemini_base_url: Option<String>) -> Config {
        Config {
            gemini_api_key: None,
            gemini_base_url,
            idea_model: "gemini-2.0-flash".to_string(),
            image_models: vec!["model-a".to_string(), "model-b".to_string()],
            storage_url: None,
            storage_key: None,
            storage_bucket: "thumbnails".to_string(),
        }
    }

    async fn post_json(
        state: AppState,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    fn concept_body() -> serde_json::Value {
        serde_json::to_value(sample_concept(7)).unwrap()
    }

    #[tokio::test]
    async fn test_ideas_rejects_missing_title() {
        let state = AppState::new(test_config(None));

        let (status, body) =
            post_json(state, "/ideas", serde_json::json!({ "apiKey": "k" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "title is required");
    }

    #[tokio::test]
    async fn test_ideas_rejects_missing_credential() {
        let state = AppState::new(test_config(None));

        let (status, body) =
            post_json(state, "/ideas", serde_json::json!({ "title": "t" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Gemini API key"));
    }

    #[tokio::test]
    async fn test_ideas_returns_parsed_concepts() {
        let server = MockServer::start().await;

        let array = serde_json::Value::Array(vec![concept_body()]);
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": array.to_string() }] }
                }]
            })))
            .mount(&server)
            .await;

        let state = AppState::new(test_config(Some(server.uri())));
        let (status, body) = post_json(
            state,
            "/ideas",
            serde_json::json!({ "title": "How to focus", "apiKey": "k" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 1);
        assert_eq!(body["concepts"][0]["id"], 7);
    }

    #[tokio::test]
    async fn test_ideas_backend_failure_is_500_with_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let state = AppState::new(test_config(Some(server.uri())));
        let (status, body) = post_json(
            state,
            "/ideas",
            serde_json::json!({ "title": "t", "apiKey": "k" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_thumbnail_rejects_missing_concept() {
        let state = AppState::new(test_config(None));

        let (status, body) =
            post_json(state, "/thumbnail", serde_json::json!({ "apiKey": "k" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "concept is required");
    }

    #[tokio::test]
    async fn test_thumbnail_without_storage_returns_inline_data() {
        let server = MockServer::start().await;

        use base64::Engine as _;
        let b64 = base64::engine::general_purpose::STANDARD.encode([0x89, 0x50, 0x4E, 0x47]);

        Mock::given(method("POST"))
            .and(path("/v1beta/models/model-a:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/png", "data": b64 } }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let state = AppState::new(test_config(Some(server.uri())));
        let (status, body) = post_json(
            state,
            "/thumbnail",
            serde_json::json!({ "concept": concept_body(), "apiKey": "k" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["model"], "model-a");
        assert!(body["imageData"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert_eq!(body["imageUrl"], serde_json::Value::Null);
        assert_eq!(body["concept"]["id"], 7);
        assert!(body["debug"]
            .as_array()
            .unwrap()
            .iter()
            .any(|l| l == "Trying model: model-a"));
    }

    #[tokio::test]
    async fn test_thumbnail_falls_back_then_uploads_to_storage() {
        let server = MockServer::start().await;

        use base64::Engine as _;
        let b64 = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3]);

        // First model has no image generation support.
        Mock::given(method("POST"))
            .and(path("/v1beta/models/model-a:generateContent"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/model-b:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/jpeg", "data": b64 } }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path_regex(r"^/storage/v1/object/thumbnails/proj-1/7_\d+\.jpg$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let state = AppState::new(test_config(Some(server.uri())));
        let (status, body) = post_json(
            state,
            "/thumbnail",
            serde_json::json!({
                "concept": concept_body(),
                "apiKey": "k",
                "storageUrl": server.uri(),
                "storageKey": "sk",
                "projectId": "proj-1",
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"], "model-b");
        let url = body["imageUrl"].as_str().unwrap();
        assert!(url.contains("/storage/v1/object/public/thumbnails/proj-1/7_"));
        let debug = body["debug"].as_array().unwrap();
        assert!(debug.iter().any(|l| l == "Trying model: model-a"));
        assert!(debug.iter().any(|l| l == "Trying model: model-b"));
    }

    #[tokio::test]
    async fn test_thumbnail_exhaustion_is_500_with_debug() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("no models today"))
            .mount(&server)
            .await;

        let state = AppState::new(test_config(Some(server.uri())));
        let (status, body) = post_json(
            state,
            "/thumbnail",
            serde_json::json!({ "concept": concept_body(), "apiKey": "k" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Failed to generate image with all models"));
        let debug = body["debug"].as_array().unwrap();
        assert!(debug.iter().any(|l| l == "Trying model: model-a"));
        assert!(debug.iter().any(|l| l == "Trying model: model-b"));
    }
}
