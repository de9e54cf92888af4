use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Telegram error: {0}")]
    TelegramError(String),
}

/// Failure of a single data provider call. Never fatal for a lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty response body")]
    EmptyBody,

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Failure of the lookup orchestration itself, as opposed to a provider call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("{provider} lookup task failed: {detail}")]
    TaskFailed {
        provider: &'static str,
        detail: String,
    },
}
