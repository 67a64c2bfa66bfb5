//! # 経費ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /expenses` - 経費作成
//! - `GET /expenses` - 経費一覧
//! - `GET /expenses/{id}` - 経費取得
//! - `PUT /expenses/{id}` - 経費更新（全置換）
//!
//! 各ハンドラは「バインド → 検証（作成のみ） → リポジトリ呼び出し → レスポンス変換」
//! の順に処理し、ストレージへの問い合わせは 1 回だけ行う。
//!
//! 更新では検証を行わない。作成と更新で受け入れ条件が異なる点に注意。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use expense_domain::expense::{Expense, ExpenseId, NewExpense};
use expense_infra::repository::ExpenseRepository;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::{ApiError, StorageOperation},
    extractor::{JsonOrDefault, bind_failure},
};

/// 経費 API の共有状態
pub struct ExpenseState {
    pub repository: Arc<dyn ExpenseRepository>,
}

// --- リクエスト/レスポンス型 ---

/// 経費作成・更新リクエスト
///
/// 欠けたフィールドと `null` はゼロ値（空文字、0、空配列）で補い、
/// 必須チェックはバリデータに任せる。本文中の `id` は無視する。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExpenseRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub title:  String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub note:   String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags:   Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ExpenseRequest> for NewExpense {
    fn from(req: ExpenseRequest) -> Self {
        Self {
            title:  req.title,
            amount: req.amount,
            note:   req.note,
            tags:   req.tags,
        }
    }
}

/// 経費 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExpenseDto {
    pub id:     i64,
    pub title:  String,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub note:   String,
    pub tags:   Vec<String>,
}

impl From<Expense> for ExpenseDto {
    fn from(expense: Expense) -> Self {
        Self {
            id:     expense.id.as_i64(),
            title:  expense.title,
            amount: expense.amount,
            note:   expense.note,
            tags:   expense.tags,
        }
    }
}

/// 小数部のない金額は `100.0` ではなく `100` として出力する
///
/// 1e21 未満の整数値は指数表記にせず、すべての桁を出力する。
fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const PLAIN_DIGITS_LIMIT: f64 = 1e21;

    if amount.fract() == 0.0 && amount.abs() < PLAIN_DIGITS_LIMIT {
        serializer.serialize_i128(*amount as i128)
    } else {
        serializer.serialize_f64(*amount)
    }
}

// --- ハンドラ ---

/// POST /expenses
///
/// ## レスポンス
///
/// - `201 Created`: 採番済み ID を含む経費
/// - `400 Bad Request`: バインド失敗、バリデーションエラー
/// - `500 Internal Server Error`: `cannot insert data`
#[tracing::instrument(skip_all)]
pub async fn create_expense(
    State(state): State<Arc<ExpenseState>>,
    JsonOrDefault(req): JsonOrDefault<ExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = NewExpense::from(req);

    draft.validate()?;

    let id = state
        .repository
        .insert(&draft)
        .await
        .map_err(|e| ApiError::storage(StorageOperation::Insert, e))?;
    tracing::debug!(%id, "経費を作成しました");

    Ok((
        StatusCode::CREATED,
        Json(ExpenseDto::from(draft.into_expense(id))),
    ))
}

/// GET /expenses/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 経費
/// - `404 Not Found`: `expense not found`
/// - `500 Internal Server Error`: `unable to scan expense`
#[tracing::instrument(skip_all)]
pub async fn get_expense(
    State(state): State<Arc<ExpenseState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // 数値でない ID はストレージ側の型変換失敗と同じく読み取りエラーとする
    let Path(raw_id) =
        path.map_err(|rejection| ApiError::UnparsableId(rejection.body_text()))?;
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ApiError::UnparsableId(raw_id.clone()))?;
    let id = ExpenseId::new(id);

    let expense = state
        .repository
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::storage(StorageOperation::Scan, e))?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(ExpenseDto::from(expense))))
}

/// GET /expenses
///
/// 並び順は保証しない。
///
/// ## レスポンス
///
/// - `200 OK`: 経費の配列（0 件なら `[]`）
/// - `500 Internal Server Error`: `cannot query expense`、`unable to scan expense`
#[tracing::instrument(skip_all)]
pub async fn list_expenses(
    State(state): State<Arc<ExpenseState>>,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = state.repository.find_all().await.map_err(|e| {
        let operation = if e.is_decode() {
            StorageOperation::Scan
        } else {
            StorageOperation::Query
        };
        ApiError::storage(operation, e)
    })?;

    let items: Vec<ExpenseDto> = expenses.into_iter().map(ExpenseDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// PUT /expenses/{id}
///
/// 検証は行わず、本文の内容で全置換する。存在しない ID でも 200 を返す。
///
/// ## レスポンス
///
/// - `200 OK`: パスの ID を設定した経費
/// - `400 Bad Request`: ID が数値でない、バインド失敗
/// - `500 Internal Server Error`: `cannot update data`
#[tracing::instrument(skip_all)]
pub async fn update_expense(
    State(state): State<Arc<ExpenseState>>,
    path: Result<Path<i64>, PathRejection>,
    JsonOrDefault(req): JsonOrDefault<ExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path.map_err(bind_failure)?;
    let id = ExpenseId::new(id);
    let draft = NewExpense::from(req);

    state
        .repository
        .update(id, &draft)
        .await
        .map_err(|e| ApiError::storage(StorageOperation::Update, e))?;

    Ok((StatusCode::OK, Json(ExpenseDto::from(draft.into_expense(id)))))
}
