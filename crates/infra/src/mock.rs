//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! expense-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use expense_domain::expense::{Expense, ExpenseId, NewExpense};

use crate::{error::InfraError, repository::ExpenseRepository};

/// モックに注入する障害
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// 文の実行自体が失敗する（接続断など）
    Query,
    /// 文は成功するが、行のデコードに失敗する
    Decode,
}

impl MockFailure {
    fn to_error(self) -> InfraError {
        match self {
            MockFailure::Query => sqlx::Error::PoolTimedOut.into(),
            MockFailure::Decode => sqlx::Error::ColumnDecode {
                index:  "\"tags\"".to_string(),
                source: "unexpected null; try decoding as an `Option`".into(),
            }
            .into(),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    expenses: Vec<Expense>,
    next_id:  i64,
    failure:  Option<MockFailure>,
}

/// インメモリの ExpenseRepository
///
/// ID は 1 から順に採番する。挿入順に保持し、`find_all` もその順で返す。
#[derive(Debug, Clone, Default)]
pub struct MockExpenseRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全操作が指定の障害で失敗するモックを作成する
    pub fn failing(failure: MockFailure) -> Self {
        let repo = Self::new();
        repo.state.lock().unwrap().failure = Some(failure);
        repo
    }

    /// 採番して経費を追加し、追加した経費を返す
    pub fn seed(&self, expense: NewExpense) -> Expense {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let expense = expense.into_expense(ExpenseId::new(state.next_id));
        state.expenses.push(expense.clone());
        expense
    }

    /// 保持している経費のスナップショットを取得する
    pub fn expenses(&self) -> Vec<Expense> {
        self.state.lock().unwrap().expenses.clone()
    }

    fn check_failure(&self) -> Result<(), InfraError> {
        match self.state.lock().unwrap().failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExpenseRepository for MockExpenseRepository {
    async fn insert(&self, expense: &NewExpense) -> Result<ExpenseId, InfraError> {
        self.check_failure()?;
        Ok(self.seed(expense.clone()).id)
    }

    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, InfraError> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        Ok(state.expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Expense>, InfraError> {
        self.check_failure()?;
        Ok(self.expenses())
    }

    async fn update(&self, id: ExpenseId, expense: &NewExpense) -> Result<(), InfraError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.expenses.iter_mut().find(|e| e.id == id) {
            *stored = expense.clone().into_expense(id);
        }
        Ok(())
    }
}
