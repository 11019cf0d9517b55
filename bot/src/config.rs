use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is honored in development).
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub token: String,
    /// Chat id receiving audit notifications. Audit is disabled when unset.
    pub admin_chat: Option<i64>,
    /// Directory holding the content pool files.
    pub content_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FORTUNA_BOT_TOKEN must be set")]
    MissingToken,
    #[error("FORTUNA_ADMIN_CHAT is not a chat id: {0:?}")]
    InvalidAdminChat(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("FORTUNA_BOT_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        let admin_chat = match env::var("FORTUNA_ADMIN_CHAT") {
            Ok(raw) => Some(parse_admin_chat(&raw)?),
            Err(_) => None,
        };
        let content_dir = env::var("FORTUNA_CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("content"));
        Ok(Self {
            token,
            admin_chat,
            content_dir,
        })
    }
}

fn parse_admin_chat(raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAdminChat(raw.to_string()))
}
