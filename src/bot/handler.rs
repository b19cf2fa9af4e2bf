//! Join event orchestration.

use std::path::Path;
use std::sync::Arc;

use crate::avatar::{AvatarSource, HttpAvatarFetcher};
use crate::bot::messenger::{Messenger, WelcomeMessage};
use crate::config::BotConfig;
use crate::foundation::core::{ChannelId, GuildId, Member};
use crate::foundation::error::WelcomeResult;
use crate::render::compose::{CardRenderer, CompositeResult, Compositor};

/// What happened for one join event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The join belongs to another server; nothing was done.
    IgnoredOtherGuild,
    /// The welcome channel could not be resolved; nothing was sent.
    ChannelMissing,
    /// Greeting sent with the card attached.
    SentWithImage,
    /// Card generation failed; the plain-text greeting was sent.
    SentTextOnly,
}

/// Greets members joining the configured server.
pub struct WelcomeHandler {
    guild_id: GuildId,
    welcome_channel_id: ChannelId,
    avatars: Arc<dyn AvatarSource>,
    renderer: Arc<dyn CardRenderer>,
}

impl WelcomeHandler {
    /// Handler for joins to `guild_id`, greeting in `welcome_channel_id`.
    pub fn new(
        guild_id: GuildId,
        welcome_channel_id: ChannelId,
        avatars: Arc<dyn AvatarSource>,
        renderer: Arc<dyn CardRenderer>,
    ) -> Self {
        Self {
            guild_id,
            welcome_channel_id,
            avatars,
            renderer,
        }
    }

    /// Production wiring: HTTP avatar fetcher and the on-disk compositor.
    pub fn from_config(config: &BotConfig) -> WelcomeResult<Self> {
        let avatars = HttpAvatarFetcher::new(config.avatar_timeout)?;
        let renderer = Compositor::new(config.assets.clone(), config.output_dir.clone());
        Ok(Self::new(
            config.guild_id,
            config.welcome_channel_id,
            Arc::new(avatars),
            Arc::new(renderer),
        ))
    }

    /// Handle one "member joined" event.
    ///
    /// Card failures degrade to a text-only greeting. Only a failed send is returned as an error.
    pub async fn on_member_join<M>(&self, messenger: &M, member: &Member) -> WelcomeResult<JoinOutcome>
    where
        M: Messenger + ?Sized,
    {
        if member.guild_id != self.guild_id {
            return Ok(JoinOutcome::IgnoredOtherGuild);
        }

        if !messenger.channel_exists(self.welcome_channel_id).await {
            tracing::error!(channel = %self.welcome_channel_id, "welcome channel not found");
            return Ok(JoinOutcome::ChannelMissing);
        }

        let avatar = self.avatars.fetch(member).await;
        let card = self.renderer.render_card(member, &avatar);

        match card {
            CompositeResult::Generated(path) if path.exists() => {
                let sent = messenger
                    .send(
                        self.welcome_channel_id,
                        WelcomeMessage::with_card(member, path.clone()),
                    )
                    .await;
                remove_card(&path);
                sent?;
                tracing::info!(member = %member.id, "sent welcome card");
                Ok(JoinOutcome::SentWithImage)
            }
            _ => {
                messenger
                    .send(self.welcome_channel_id, WelcomeMessage::text_only(member))
                    .await?;
                tracing::info!(member = %member.id, "sent text-only welcome");
                Ok(JoinOutcome::SentTextOnly)
            }
        }
    }
}

fn remove_card(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::debug!(path = %path.display(), error = %e, "could not remove welcome card");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bot/handler.rs"]
mod tests;
