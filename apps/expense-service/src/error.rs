//! # Expense Service エラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | ステータス | `message` |
//! |--------|-----------|-----------|
//! | `InvalidRequest` | 400 | `invalid request` |
//! | `Validation` | 400 | バリデータの文言 |
//! | `NotFound` | 404 | `expense not found` |
//! | `Storage` | 500 | 操作ごとの固定文言 |
//! | `UnparsableId` | 500 | `unable to scan expense` |
//!
//! 500 系の原因はログにのみ出力し、レスポンスには含めない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use expense_domain::DomainError;
use expense_infra::InfraError;
use expense_shared::ErrorResponse;
use thiserror::Error;

/// ストレージ操作の種類
///
/// 失敗時にクライアントへ返す文言を決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    /// 経費の挿入
    Insert,
    /// 一覧クエリの実行
    Query,
    /// 行の読み取り
    Scan,
    /// 経費の更新
    Update,
}

impl StorageOperation {
    /// クライアントに返す文言
    pub fn message(self) -> &'static str {
        match self {
            StorageOperation::Insert => "cannot insert data",
            StorageOperation::Query => "cannot query expense",
            StorageOperation::Scan => "unable to scan expense",
            StorageOperation::Update => "cannot update data",
        }
    }
}

/// ハンドラで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストのバインド失敗（JSON 不正、パスパラメータ不正）
    #[error("不正なリクエスト")]
    InvalidRequest,

    /// バリデーションエラー
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// 経費が見つからない
    #[error("経費が見つかりません")]
    NotFound,

    /// ストレージエラー
    #[error("{}: {source}", .operation.message())]
    Storage {
        operation: StorageOperation,
        #[source]
        source:    InfraError,
    },

    /// ストレージの ID 型に変換できない ID での読み取り
    #[error("ID を数値に変換できません: {0:?}")]
    UnparsableId(String),
}

impl ApiError {
    pub fn storage(operation: StorageOperation, source: InfraError) -> Self {
        Self::Storage { operation, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidRequest => (StatusCode::BAD_REQUEST, ErrorResponse::invalid_request()),
            ApiError::Validation(e) => {
                tracing::warn!("{}", e);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(e.message()))
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::expense_not_found()),
            ApiError::Storage { operation, source } => {
                tracing::error!(
                    span_trace = %source.span_trace(),
                    "{}: {}",
                    operation.message(),
                    source
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(operation.message()),
                )
            }
            ApiError::UnparsableId(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(StorageOperation::Scan.message()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
