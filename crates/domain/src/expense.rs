//! # 経費
//!
//! 1 件の支出記録を表現するドメインモデル。
//!
//! ## 型の使い分け
//!
//! - [`NewExpense`]: 採番前の経費。作成・更新リクエストの内容を保持する
//! - [`Expense`]: 永続化済みの経費。ストレージが採番した [`ExpenseId`] を持つ
//!
//! ID はストレージが採番するため、`NewExpense` は ID を持たない。
//! 採番後は [`NewExpense::into_expense`] で `Expense` に変換する。
//!
//! ## 受け入れ条件
//!
//! [`NewExpense::validate`] が次の順に検査し、最初の違反を返す:
//!
//! 1. `title` が空でない
//! 2. `amount` が 0 より大きい
//! 3. `note` が空でない
//! 4. `tags` が 1 件以上ある
//!
//! タグの順序と重複は入力のまま保持する（ソート・重複排除はしない）。

use derive_more::{Display, From};

use crate::DomainError;

/// 経費の一意識別子
///
/// ストレージの連番カラムに対応する。0 は「未採番」を意味し、
/// 永続化済みの経費が 0 を持つことはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("{_0}")]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 採番前の経費
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewExpense {
    pub title:  String,
    pub amount: f64,
    pub note:   String,
    pub tags:   Vec<String>,
}

impl NewExpense {
    /// 経費の受け入れ条件を検査する
    ///
    /// 集約はせず、最初に見つかった違反のみを返す。
    /// NaN の金額は「0 より大きい」を満たさないため金額エラーになる。
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }
        if self.amount.is_nan() || self.amount <= 0.0 {
            return Err(DomainError::Validation(
                "amount is required and must be greater than 0".to_string(),
            ));
        }
        if self.note.is_empty() {
            return Err(DomainError::Validation("note is required".to_string()));
        }
        if self.tags.is_empty() {
            return Err(DomainError::Validation(
                "at least one tag is required".to_string(),
            ));
        }
        Ok(())
    }

    /// 採番済み ID を付与して永続化済みの経費に変換する
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            note: self.note,
            tags: self.tags,
        }
    }
}

/// 永続化済みの経費
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id:     ExpenseId,
    pub title:  String,
    pub amount: f64,
    pub note:   String,
    pub tags:   Vec<String>,
}
