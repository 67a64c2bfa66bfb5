//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ```json
//! { "message": "expense not found" }
//! ```
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）
//! - 固定文言のエラーは便利コンストラクタで提供し、文言のハードコードを一箇所に集める

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// 単一フィールド `message` のみを持つ。内部エラーの原因は含めない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    /// 任意の文言でエラーレスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// リクエストのバインドに失敗した場合の固定レスポンス
    ///
    /// パースエラーの詳細は返さない。
    pub fn invalid_request() -> Self {
        Self::new("invalid request")
    }

    /// 経費が存在しない場合の固定レスポンス
    pub fn expense_not_found() -> Self {
        Self::new("expense not found")
    }
}
