//! # ExpenseRepository
//!
//! 経費の永続化を担当するリポジトリ。
//!
//! ## テーブル
//!
//! ```text
//! expenses(id BIGSERIAL, title TEXT, amount DOUBLE PRECISION, note TEXT, tags TEXT[])
//! ```
//!
//! `tags` はネイティブの配列カラムで保持するため、順序と重複はそのまま往復する。
//!
//! ## 契約
//!
//! - 各メソッドは 1 文のみを実行する（複数文トランザクションは使わない）
//! - `find_by_id` は該当行なしを `Ok(None)` で返す（エラーにしない）
//! - `find_all` は ORDER BY を付けない。順序はストレージ依存
//! - `update` は対象行が 0 件でも成功を返す

use async_trait::async_trait;
use expense_domain::expense::{Expense, ExpenseId, NewExpense};
use sqlx::PgPool;

use crate::error::InfraError;

/// 経費リポジトリトレイト
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// 経費を挿入し、採番された ID を返す
    async fn insert(&self, expense: &NewExpense) -> Result<ExpenseId, InfraError>;

    /// ID で経費を検索する
    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, InfraError>;

    /// 全経費を取得する
    ///
    /// 途中の行でデコードに失敗した場合、取得済みの行は破棄してエラーを返す。
    async fn find_all(&self) -> Result<Vec<Expense>, InfraError>;

    /// ID で指定した経費の内容を全置換する
    async fn update(&self, id: ExpenseId, expense: &NewExpense) -> Result<(), InfraError>;
}

/// `expenses` テーブルの 1 行
///
/// 全カラムを非 Option で受けるため、NULL を含む行はデコードエラーになる。
#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id:     i64,
    title:  String,
    amount: f64,
    note:   String,
    tags:   Vec<String>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id:     ExpenseId::new(row.id),
            title:  row.title,
            amount: row.amount,
            note:   row.note,
            tags:   row.tags,
        }
    }
}

/// PostgreSQL 実装の ExpenseRepository
#[derive(Debug, Clone)]
pub struct PostgresExpenseRepository {
    pool: PgPool,
}

impl PostgresExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, expense: &NewExpense) -> Result<ExpenseId, InfraError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO expenses (title, amount, note, tags)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&expense.note)
        .bind(expense.tags.as_slice())
        .fetch_one(&self.pool)
        .await?;

        Ok(ExpenseId::new(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, InfraError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, title, amount, note, tags
            FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Expense::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Expense>, InfraError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, title, amount, note, tags
            FROM expenses
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: ExpenseId, expense: &NewExpense) -> Result<(), InfraError> {
        // 影響行数は見ない（存在しない ID の更新も成功扱い）
        sqlx::query(
            r#"
            UPDATE expenses
            SET title = $2, amount = $3, note = $4, tags = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&expense.note)
        .bind(expense.tags.as_slice())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
