//! # Expense 共有ユーティリティ
//!
//! サービス全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（HTTP レスポンスへの変換は各サービスの責務）

pub mod error_response;
pub mod observability;

pub use error_response::ErrorResponse;
