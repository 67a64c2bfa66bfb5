//! # Expense Service アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use expense_infra::repository::ExpenseRepository;
use expense_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ExpenseState,
        create_expense,
        get_expense,
        health_check,
        list_expenses,
        update_expense,
    },
    middleware::{AuthState, require_token},
};

/// ルーターを構築する
///
/// リポジトリはトレイトオブジェクトで受け取り、テストではモックを注入する。
pub fn build_app(repository: Arc<dyn ExpenseRepository>, auth_token: &str) -> Router {
    let expense_state = Arc::new(ExpenseState { repository });
    let auth_state = AuthState::new(auth_token);

    // 経費 API（トークン必須）
    let expenses = Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).put(update_expense))
        .route_layer(from_fn_with_state(auth_state, require_token))
        .with_state(expense_state);

    Router::new()
        .route("/health", get(health_check))
        .merge(expenses)
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: スパンに request_id を含める
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
