//! # Expense Service ライブラリ
//!
//! 経費の作成・取得・一覧・更新を提供する HTTP サービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ハンドラエラーと HTTP レスポンスへの変換
//! - `extractor`: カスタムエクストラクタ（JSON 本文のバインド）
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（トークン認証）
//! - `server`: HTTP サーバーの起動と停止

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extractor;
pub mod handler;
pub mod middleware;
pub mod server;
