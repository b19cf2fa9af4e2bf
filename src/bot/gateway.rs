//! Adapter between the Discord gateway (via `serenity`) and [`WelcomeHandler`].

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use serenity::all::{
    Client, Context, CreateAttachment, CreateMessage, EventHandler, GatewayIntents, Ready,
};

use crate::bot::handler::{JoinOutcome, WelcomeHandler};
use crate::bot::messenger::{Messenger, WelcomeMessage};
use crate::config::BotConfig;
use crate::foundation::core::{ChannelId, GuildId, Member, MemberId};
use crate::foundation::error::{WelcomeError, WelcomeResult};

/// Intents needed to receive member joins.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS
}

/// Convert the SDK member into the pipeline's [`Member`].
pub fn member_from_sdk(member: &serenity::all::Member) -> Member {
    Member {
        id: MemberId(member.user.id.get()),
        guild_id: GuildId(member.guild_id.get()),
        name: member.user.name.clone(),
        avatar_url: member.user.avatar_url(),
    }
}

/// [`Messenger`] backed by the event's serenity context.
pub struct SerenityMessenger {
    ctx: Context,
}

impl SerenityMessenger {
    /// Wrap the context of the current event.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Messenger for SerenityMessenger {
    async fn channel_exists(&self, channel: ChannelId) -> bool {
        match serenity::all::ChannelId::new(channel.0)
            .to_channel(&self.ctx)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(%channel, error = %e, "channel lookup failed");
                false
            }
        }
    }

    async fn send(&self, channel: ChannelId, message: WelcomeMessage) -> WelcomeResult<()> {
        let mut builder = CreateMessage::new().content(message.content);
        if let Some(path) = &message.attachment {
            let file = CreateAttachment::path(path).await.map_err(|e| {
                WelcomeError::send(format!("attach '{}': {e}", path.display()))
            })?;
            builder = builder.add_file(file);
        }
        serenity::all::ChannelId::new(channel.0)
            .send_message(&self.ctx, builder)
            .await
            .map_err(|e| WelcomeError::send(e.to_string()))?;
        Ok(())
    }
}

struct Gateway {
    handler: Arc<WelcomeHandler>,
}

#[async_trait]
impl EventHandler for Gateway {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("{} is online and ready!", ready.user.name);
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: serenity::all::Member) {
        let member = member_from_sdk(&new_member);
        let messenger = SerenityMessenger::new(ctx);
        match self.handler.on_member_join(&messenger, &member).await {
            Ok(JoinOutcome::IgnoredOtherGuild) => {
                tracing::trace!(guild = %member.guild_id, "join in another guild ignored");
            }
            Ok(outcome) => tracing::debug!(member = %member.id, ?outcome, "join handled"),
            Err(e) => tracing::error!(member = %member.id, error = %e, "welcome failed"),
        }
    }
}

/// Connect to the gateway and greet members until the connection ends.
pub async fn run(config: BotConfig) -> WelcomeResult<()> {
    let handler = WelcomeHandler::from_config(&config)?;
    let mut client = Client::builder(&config.token, intents())
        .event_handler(Gateway {
            handler: Arc::new(handler),
        })
        .await
        .context("failed to build gateway client")?;

    client.start().await.context("gateway connection ended")?;
    Ok(())
}
