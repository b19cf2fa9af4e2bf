//! Welcomer greets new members of a community server with a personalised welcome card.
//!
//! # Pipeline overview
//!
//! 1. **Filter**: joins to servers other than the configured one are ignored.
//! 2. **Fetch**: the member's avatar is downloaded ([`HttpAvatarFetcher`]); any failure means
//!    "no avatar".
//! 3. **Compose**: [`Compositor`] stretches the background to 600x400, pastes the avatar and the
//!    mirrored fallback avatar, shapes and centres the right-to-left greeting, and hangs the
//!    decorative overlay under the text.
//! 4. **Send**: the card is attached to a greeting in the welcome channel and then removed from
//!    disk. If no card could be produced, a text-only greeting is sent instead.
//!
//! All image work is synchronous and runs inline in the join task. Static assets are read-only
//! and every join writes its own `welcome_<member id>.png`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod avatar;
mod bot;
mod config;
mod foundation;
mod render;

#[cfg(test)]
#[path = "../tests/support/fonts.rs"]
mod test_support;

pub use assets::decode::{decode_rgba, load_optional_rgba, load_rgba};
pub use avatar::{AvatarSource, FetchResult, HttpAvatarFetcher};
pub use bot::gateway::{SerenityMessenger, intents, member_from_sdk, run};
pub use bot::handler::{JoinOutcome, WelcomeHandler};
pub use bot::messenger::{Messenger, WelcomeMessage};
pub use config::{AssetPaths, BotConfig, DEFAULT_AVATAR_TIMEOUT};
pub use foundation::core::{ChannelId, GuildId, Member, MemberId};
pub use foundation::error::{WelcomeError, WelcomeResult};
pub use render::compose::{CardRenderer, CompositeResult, Compositor};
pub use render::composite::{masked, paste_masked};
pub use render::template::greeting_lines;
pub use render::text::{LineMetrics, PlacedLine, TextBlockLayout};
