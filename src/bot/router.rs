use std::fmt;
use teloxide::types::Chat;

/// How the bot is being talked to. Group chats require an explicit mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

impl ChatKind {
    pub fn of(chat: &Chat) -> Self {
        if chat.is_group() || chat.is_supergroup() {
            ChatKind::Group
        } else {
            ChatKind::Private
        }
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatKind::Private => write!(f, "private"),
            ChatKind::Group => write!(f, "group"),
        }
    }
}

/// Returns the text the lookup should run on, or `None` when the bot must
/// stay silent (a group message that does not mention it).
pub fn extract_query(kind: ChatKind, text: &str, mention: &str) -> Option<String> {
    match kind {
        ChatKind::Private => Some(text.trim().to_string()),
        ChatKind::Group => {
            if mention.is_empty() || !text.contains(mention) {
                return None;
            }
            Some(text.replace(mention, "").trim().to_string())
        }
    }
}

/// Same gating for `/token`: in a group the command counts only when the
/// message mentions the bot (`/token@bot` or a separate `@bot`). The mention
/// is stripped from the argument.
pub fn command_query(kind: ChatKind, text: &str, argument: &str, mention: &str) -> Option<String> {
    if kind == ChatKind::Group && (mention.is_empty() || !text.contains(mention)) {
        return None;
    }
    if mention.is_empty() {
        return Some(argument.trim().to_string());
    }
    Some(argument.replace(mention, "").trim().to_string())
}
