//! # カスタムエクストラクタ
//!
//! バインドの失敗はすべて [`ApiError::InvalidRequest`] に変換し、
//! 失敗の詳細はログにのみ出力する。

use std::fmt;

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON 本文を取り出す。空の本文は `T::default()` として扱う
///
/// - 本文が空なら Content-Type を確認せずに既定値を返す
/// - 本文があれば `application/json`（または `application/*+json`）を要求する
pub struct JsonOrDefault<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrDefault<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(bind_failure)?;

        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }
        if !is_json {
            return Err(bind_failure("Content-Type が application/json ではありません"));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(bind_failure)?;
        Ok(Self(value))
    }
}

/// バインド失敗をログに出力し、400 用のエラーに変換する
pub(crate) fn bind_failure(reason: impl fmt::Display) -> ApiError {
    tracing::error!("リクエストのバインドに失敗しました: {}", reason);
    ApiError::InvalidRequest
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split_once(';').map_or(value, |(essence, _)| essence).trim();

    essence.eq_ignore_ascii_case("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::StatusCode,
        response::IntoResponse,
        routing::post,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Payload {
        name: String,
    }

    async fn echo(JsonOrDefault(payload): JsonOrDefault<Payload>) -> impl IntoResponse {
        payload.name
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, String) {
        let sut = Router::new().route("/", post(echo));
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let response = sut
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[rstest]
    #[case::content_typeなし(None)]
    #[case::json(Some("application/json"))]
    #[case::jsonでない(Some("text/plain"))]
    #[tokio::test]
    async fn test_空の本文は既定値になる(#[case] content_type: Option<&str>) {
        assert_eq!(send(content_type, "").await, (StatusCode::OK, String::new()));
    }

    #[rstest]
    #[case::json("application/json")]
    #[case::charset付き("application/json; charset=utf-8")]
    #[case::大文字("Application/JSON")]
    #[case::jsonサフィックス("application/vnd.expense+json")]
    #[tokio::test]
    async fn test_json本文を取り出す(#[case] content_type: &str) {
        assert_eq!(
            send(Some(content_type), r#"{"name":"lunch"}"#).await,
            (StatusCode::OK, "lunch".to_string())
        );
    }

    #[rstest]
    #[case::content_typeなし(None, r#"{"name":"lunch"}"#)]
    #[case::jsonでないcontent_type(Some("text/plain"), r#"{"name":"lunch"}"#)]
    #[case::構文エラー(Some("application/json"), "{")]
    #[case::型の不一致(Some("application/json"), r#"{"name":1}"#)]
    #[tokio::test]
    async fn test_不正な本文は400とinvalid_request(
        #[case] content_type: Option<&str>,
        #[case] body: &'static str,
    ) {
        assert_eq!(
            send(content_type, body).await,
            (
                StatusCode::BAD_REQUEST,
                r#"{"message":"invalid request"}"#.to_string()
            )
        );
    }
}
