//! # Expense ドメイン層
//!
//! 経費（Expense）のドメインモデルと、その受け入れ条件を定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//! バリデーションは純粋関数として実装され、副作用を持たない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`expense`] - 経費エンティティとバリデーション
//!
//! ## 使用例
//!
//! ```rust
//! use expense_domain::expense::NewExpense;
//!
//! let expense = NewExpense {
//!     title:  "strawberry smoothie".to_string(),
//!     amount: 79.0,
//!     note:   "night market promotion discount 10 bath".to_string(),
//!     tags:   vec!["food".to_string(), "beverage".to_string()],
//! };
//! assert!(expense.validate().is_ok());
//! ```

pub mod error;
pub mod expense;

pub use error::DomainError;
