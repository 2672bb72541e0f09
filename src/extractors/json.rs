//! Lenient JSON body extractor. Never rejects a body for not being JSON;
//! handlers decide when that is an error, after their own path checks.

use crate::error::AppError;
use crate::models::Payload;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
};
use serde_json::Value;

/// The request body when it is a JSON object sent as JSON, otherwise `None`.
#[derive(Clone, Debug, Default)]
pub struct JsonBody(pub Option<Payload>);

impl JsonBody {
    pub fn into_object(self) -> Result<Payload, AppError> {
        self.0.ok_or_else(AppError::not_json)
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge
                } else {
                    AppError::BadRequest(e.body_text())
                }
            })?;
        if !is_json || bytes.is_empty() {
            return Ok(JsonBody(None));
        }
        let payload = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        };
        Ok(JsonBody(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: Option<&str>, body: &'static str) -> JsonBody {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonBody::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn objects_sent_as_json_are_kept() {
        let body = extract(Some("application/json; charset=utf-8"), r#"{"name":"Wifi"}"#).await;
        assert_eq!(body.into_object().unwrap()["name"], "Wifi");
    }

    #[tokio::test]
    async fn anything_else_is_not_a_json() {
        for (ct, raw) in [
            (Some("application/json"), "[1, 2]"),
            (Some("application/json"), "{oops"),
            (Some("text/plain"), r#"{"name":"Wifi"}"#),
            (None, r#"{"name":"Wifi"}"#),
            (Some("application/json"), ""),
        ] {
            let err = extract(ct, raw).await.into_object().unwrap_err();
            assert_eq!(err.to_string(), "Not a JSON");
        }
    }
}
