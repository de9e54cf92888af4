use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::bot::router::{command_query, extract_query, ChatKind};
use crate::bot::BotState;
use crate::lookup::address::EXAMPLE_ADDRESS;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show this help message")]
    Help,
    #[command(description = "A custom command")]
    Custom,
    #[command(description = "Look up a token by contract address")]
    Token { address: String },
}

pub fn welcome_text() -> &'static str {
    "Hello! Thanks for chatting with me! I am a trading bot"
}

pub fn help_text() -> String {
    format!(
        "Give Contact Address\n\n\
        Send me a Solana token contract address and I'll reply with price, volume, \
        liquidity and links. In groups, mention me together with the address.\n\n\
        Example: {}\n\n{}",
        EXAMPLE_ADDRESS,
        Command::descriptions()
    )
}

// --- Command Handler ---

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    info!("Received command: {:?} in chat {}", cmd, chat_id.0);

    match cmd {
        Command::Start => {
            bot.send_message(chat_id, welcome_text()).await?;
        }
        Command::Help => {
            bot.send_message(chat_id, help_text()).await?;
        }
        Command::Custom => {
            bot.send_message(chat_id, "This is a custom command").await?;
        }
        Command::Token { address } => {
            let kind = ChatKind::of(&msg.chat);
            let text = msg.text().unwrap_or_default();
            match command_query(kind, text, &address, &state.bot_username) {
                Some(query) => reply_with_lookup(&bot, chat_id, &state, &query).await?,
                None => debug!("/token in {} without {} mention, staying silent", kind, state.bot_username),
            }
        }
    }

    Ok(())
}

// --- Free Text Handler ---

pub async fn message_handler(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!("Ignoring non-text message in chat {}", msg.chat.id.0);
        return Ok(());
    };

    let kind = ChatKind::of(&msg.chat);
    info!("User ({}) in {}: \"{}\"", msg.chat.id.0, kind, text);

    match extract_query(kind, text, &state.bot_username) {
        Some(query) => reply_with_lookup(&bot, msg.chat.id, &state, &query).await,
        None => {
            debug!("Group message without {} mention, staying silent", state.bot_username);
            Ok(())
        }
    }
}

async fn reply_with_lookup(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    query: &str,
) -> ResponseResult<()> {
    // Best effort: a failed chat action must not cost the reply.
    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        warn!("Failed to send typing action to chat {}: {}", chat_id.0, e);
    }

    let response = state.lookup.respond(query).await;
    info!("Bot: {}", response.lines().next().unwrap_or_default());

    bot.send_message(chat_id, response)
        .disable_web_page_preview(true)
        .await?;
    Ok(())
}

pub async fn start_bot(bot: Bot, state: Arc<BotState>) -> anyhow::Result<()> {
    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(dptree::endpoint(message_handler));

    info!("Polling for updates as {}...", state.bot_username);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");
    Ok(())
}
