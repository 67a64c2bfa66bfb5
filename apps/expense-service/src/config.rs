//! # Expense Service 設定
//!
//! 環境変数からサーバーの設定を読み込む。

use std::{env, fmt};

use thiserror::Error;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定（または空）
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Expense Service サーバーの設定
#[derive(Clone)]
pub struct ExpenseConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// `Authorization` ヘッダーと照合するトークン
    pub auth_token:   String,
}

impl ExpenseConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = required("PORT")?;
        let port = port
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name:  "PORT",
                value: port.clone(),
            })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: required("DATABASE_URL")?,
            auth_token: required("AUTH_TOKEN")?,
        })
    }
}

// トークンと接続 URL（パスワードを含みうる）はログに出さない
impl fmt::Debug for ExpenseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpenseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}
