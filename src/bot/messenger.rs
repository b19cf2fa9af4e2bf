use std::path::PathBuf;

use async_trait::async_trait;

use crate::foundation::core::{ChannelId, Member};
use crate::foundation::error::WelcomeResult;
use crate::render::template::{DEGRADED_NOTE, GREETING_SUFFIX};

/// One outbound chat message, optionally with a file attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomeMessage {
    /// Message text, including the mention.
    pub content: String,
    /// File uploaded with the message.
    pub attachment: Option<PathBuf>,
}

impl WelcomeMessage {
    /// Mention + greeting, with the rendered card attached.
    pub fn with_card(member: &Member, card: PathBuf) -> Self {
        Self {
            content: greeting(member),
            attachment: Some(card),
        }
    }

    /// Mention + greeting + a note that the card could not be produced.
    pub fn text_only(member: &Member) -> Self {
        Self {
            content: format!("{} {DEGRADED_NOTE}", greeting(member)),
            attachment: None,
        }
    }
}

fn greeting(member: &Member) -> String {
    format!("🎉 {} {GREETING_SUFFIX}", member.mention())
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Whether `channel` can be resolved (exists and is visible to the bot).
    async fn channel_exists(&self, channel: ChannelId) -> bool;

    /// Post `message` to `channel`. Failures surface as [`crate::WelcomeError::Send`].
    async fn send(&self, channel: ChannelId, message: WelcomeMessage) -> WelcomeResult<()>;
}
