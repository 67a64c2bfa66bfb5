//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health  →  200 text/plain "healthy"
//! ```
//!
//! 認証不要。データベースには問い合わせない（プロセスの死活のみを返す）。

use axum::http::StatusCode;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}
