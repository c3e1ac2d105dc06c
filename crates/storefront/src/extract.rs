//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body.
///
/// Bodies that are missing, malformed or fail to deserialize are rejected
/// through [`AppError`], so clients get a 400 with the usual `{"error": ...}`
/// body instead of a plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Json, Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        routing::post,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use lumera_core::CustomizationSelection;

    use super::*;

    async fn echo(
        JsonBody(selection): JsonBody<CustomizationSelection>,
    ) -> Json<CustomizationSelection> {
        Json(selection)
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = Router::new()
            .route("/", post(echo))
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let (status, body) = send(r#"{"ringSize":15}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ringSize"], 15);
    }

    #[tokio::test]
    async fn test_invalid_value_is_a_json_bad_request() {
        let (status, body) = send(r#"{"ringSize":31}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("ring size 31"));
    }

    #[tokio::test]
    async fn test_unknown_metal_and_bad_syntax_are_rejected() {
        let (status, body) = send(r#"{"metalType":"Brass"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = send("{", Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(r#"{"ringSize":15}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
