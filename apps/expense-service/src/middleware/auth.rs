//! # 認証ミドルウェア
//!
//! `Authorization` ヘッダーの値を設定済みトークンと照合する。
//!
//! - ヘッダー値全体を照合する（`Bearer ` などのスキームは解釈しない）
//! - 不一致・欠落時は 401 とプレーンテキスト `Unauthorized` を返し、ハンドラは実行しない
//!
//! ルーターには `route_layer` で適用する。未定義のパスは認証より先に 404 となる。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

/// 認証の状態
#[derive(Clone)]
pub struct AuthState {
    token: Arc<str>,
}

impl AuthState {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// ヘッダー値がトークンと一致するか
    ///
    /// タイミング攻撃対策として定数時間比較を使用する。
    fn accepts(&self, provided: &[u8]) -> bool {
        self.token.as_bytes().ct_eq(provided).into()
    }
}

/// トークン検証ミドルウェア
pub async fn require_token(
    State(state): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|value| state.accepts(value.as_bytes()));

    if !authorized {
        tracing::warn!(path = %request.uri().path(), "認証に失敗しました");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(request).await
}
