use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod bot;
mod config;
mod error;
mod lookup;
mod models;

use crate::config::{normalize_mention, Config};
use crate::error::BotError;
use crate::lookup::TokenLookupService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables first so RUST_LOG from .env applies
    dotenv().ok();

    // Initialize logging
    init_logging(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))?;

    info!("Starting Bot...");

    let config = Arc::new(Config::load()?);
    info!("Configuration loaded successfully");

    let lookup = Arc::new(TokenLookupService::from_config(&config)?);
    info!(
        "Token lookup initialized (DexScreener: {}, Birdeye: {})",
        config.dexscreener_api_url, config.birdeye_api_url
    );

    let bot = Bot::new(&config.telegram_bot_token);
    let bot_username = resolve_bot_username(&bot, &config).await?;
    info!("Group mention token: {}", bot_username);

    let state = Arc::new(bot::BotState {
        lookup,
        bot_username,
    });

    bot::commands::start_bot(bot, state).await?;

    Ok(())
}

/// Installs the global subscriber and forwards `log` records (teloxide's
/// dispatcher and polling errors) into it.
fn init_logging(filter: EnvFilter) -> Result<()> {
    LogTracer::init().context("Failed to install log bridge")?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Configured username wins; otherwise ask Telegram who we are.
async fn resolve_bot_username(bot: &Bot, config: &Config) -> Result<String> {
    if let Some(username) = &config.bot_username {
        return Ok(username.clone());
    }

    let me = bot
        .get_me()
        .await
        .context("Failed to fetch bot identity from Telegram")?;
    let username = me
        .user
        .username
        .clone()
        .ok_or_else(|| BotError::TelegramError("bot account has no username".to_string()))?;
    Ok(normalize_mention(&username))
}
