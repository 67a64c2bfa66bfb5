//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供

pub mod expense;
pub mod health;

pub use expense::{
    ExpenseState,
    create_expense,
    get_expense,
    list_expenses,
    update_expense,
};
pub use health::health_check;
