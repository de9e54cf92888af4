use std::sync::Arc;

use crate::lookup::TokenLookupService;

pub mod commands;
pub mod router;

/// Shared, read-only state handed to every update handler.
#[derive(Clone)]
pub struct BotState {
    pub lookup: Arc<TokenLookupService>,
    pub bot_username: String, // Mention token, e.g. "@QTtrades_bot"
}
