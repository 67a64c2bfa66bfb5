//! # ミドルウェア
//!
//! Expense Service 用のミドルウェアを提供する。

mod auth;

pub use auth::{AuthState, require_token};
