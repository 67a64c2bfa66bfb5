//! # Expense Service サーバー
//!
//! 経費の記録を管理する HTTP サービス。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 認証 | 説明 |
//! |---------|------|------|------|
//! | `GET` | `/health` | 不要 | 死活確認 |
//! | `POST` | `/expenses` | 必要 | 経費作成 |
//! | `GET` | `/expenses` | 必要 | 経費一覧 |
//! | `GET` | `/expenses/{id}` | 必要 | 経費取得 |
//! | `PUT` | `/expenses/{id}` | 必要 | 経費更新 |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `AUTH_TOKEN` | **Yes** | `Authorization` ヘッダーと照合するトークン |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,expense=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! PORT=2565 DATABASE_URL=postgres://... AUTH_TOKEN="November 10, 2009" \
//!     cargo run -p expense-service
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use expense_infra::{db, repository::PostgresExpenseRepository};
use expense_service::{
    app_builder::build_app,
    config::ExpenseConfig,
    server::{self, DRAIN_TIMEOUT},
};
use expense_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Expense Service サーバーのエントリーポイント
///
/// 1. 環境変数とトレーシングの初期化
/// 2. 設定の読み込み
/// 3. データベース接続とスキーマ適用
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動（SIGINT / SIGTERM で graceful shutdown、猶予 10 秒）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let _tracing_guard = init_tracing(TracingConfig::from_env("expense-service")).entered();

    // 設定読み込み
    let config = ExpenseConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Expense Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("スキーマの適用に失敗しました")?;

    let repository = Arc::new(PostgresExpenseRepository::new(pool));
    let app = build_app(repository, &config.auth_token);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;
    tracing::info!("Expense Service サーバーが起動しました: {}", addr);

    server::serve(listener, app, server::shutdown_signal(), DRAIN_TIMEOUT).await?;

    tracing::info!("Expense Service サーバーを停止しました");
    Ok(())
}
