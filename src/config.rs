use anyhow::{Context, Result};
use std::env;

use crate::error::BotError;

pub const DEFAULT_DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_BIRDEYE_API_URL: &str = "https://public-api.birdeye.so";
pub const DEFAULT_TRADE_URL: &str = "https://raydium.io/swap/";
pub const DEFAULT_EXPLORER_URL: &str = "https://solscan.io/token/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Mention token used in group chats, always `@`-prefixed.
    /// Resolved through `getMe` at startup when not configured.
    pub bot_username: Option<String>,

    pub dexscreener_api_url: String,
    pub birdeye_api_url: String,
    pub birdeye_api_key: Option<String>, // Optional, public endpoint works without it for low volume

    pub http_timeout_secs: u64,

    // Links rendered at the bottom of every report
    pub trade_url: String,
    pub explorer_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN not set in environment")?;
        if telegram_bot_token.trim().is_empty() {
            return Err(BotError::ConfigError("TELEGRAM_BOT_TOKEN is empty".to_string()).into());
        }

        Ok(Self {
            telegram_bot_token,
            bot_username: optional_var("BOT_USERNAME").map(|name| normalize_mention(&name)),

            dexscreener_api_url: env::var("DEXSCREENER_API_URL")
                .unwrap_or_else(|_| DEFAULT_DEXSCREENER_API_URL.to_string()),
            birdeye_api_url: env::var("BIRDEYE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BIRDEYE_API_URL.to_string()),
            birdeye_api_key: optional_var("BIRDEYE_API_KEY"),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .context("Failed to parse HTTP_TIMEOUT_SECS")?,

            trade_url: env::var("TRADE_URL").unwrap_or_else(|_| DEFAULT_TRADE_URL.to_string()),
            explorer_url: env::var("EXPLORER_URL")
                .unwrap_or_else(|_| DEFAULT_EXPLORER_URL.to_string()),
        })
    }

    /// Config pointing both providers at the given base URLs. Used by tests
    /// that stand up mock servers.
    #[cfg(test)]
    pub fn for_providers(dexscreener_api_url: &str, birdeye_api_url: &str) -> Self {
        Self {
            telegram_bot_token: "test-token".to_string(),
            bot_username: Some("@QTtrades_bot".to_string()),
            dexscreener_api_url: dexscreener_api_url.to_string(),
            birdeye_api_url: birdeye_api_url.to_string(),
            birdeye_api_key: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            trade_url: DEFAULT_TRADE_URL.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
        }
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Telegram mentions are written as `@username`.
pub fn normalize_mention(username: &str) -> String {
    let trimmed = username.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{}", trimmed)
    }
}
