//! # リポジトリ実装
//!
//! - **依存性注入**: ハンドラはトレイト経由でリポジトリを受け取る
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: `test-utils` feature でインメモリ実装を提供

pub mod expense_repository;

pub use expense_repository::{ExpenseRepository, PostgresExpenseRepository};
