//! Start-up configuration.
//!
//! Everything here is read once when the process starts and then shared read-only (behind an
//! `Arc`) by every join event.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::core::{ChannelId, GuildId};
use crate::foundation::error::{WelcomeError, WelcomeResult};

/// Default avatar download budget when `WELCOMER_AVATAR_TIMEOUT_SECS` is unset.
pub const DEFAULT_AVATAR_TIMEOUT: Duration = Duration::from_secs(10);

/// On-disk locations of the static card assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    /// Background image, stretched to the canvas.
    pub background: PathBuf,
    /// Default avatar drawn (mirrored) in the top-right corner.
    pub fallback_avatar: PathBuf,
    /// Decorative image placed under the text; optional on disk.
    pub overlay: PathBuf,
    /// Font used for the right-to-left greeting.
    pub font: PathBuf,
}

impl AssetPaths {
    /// Standard asset file names resolved inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            background: dir.join("welcome_image.jpg"),
            fallback_avatar: dir.join("default_avatar.jpg"),
            overlay: dir.join("extra_image.png"),
            font: dir.join("Vazir-Bold.ttf"),
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Immutable bot configuration.
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Platform bot token.
    pub token: String,
    /// Only joins to this server are greeted.
    pub guild_id: GuildId,
    /// Channel that receives the welcome messages.
    pub welcome_channel_id: ChannelId,
    /// Static card assets.
    pub assets: AssetPaths,
    /// Directory for the transient `welcome_<id>.png` files.
    pub output_dir: PathBuf,
    /// Total time budget for one avatar download.
    pub avatar_timeout: Duration,
}

impl BotConfig {
    /// Build the configuration from `WELCOMER_*` environment variables.
    ///
    /// Callers that want `.env` support should run `dotenvy::dotenv()` first.
    pub fn from_env() -> WelcomeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WelcomeResult<Self> {
        let token = lookup("WELCOMER_TOKEN")
            .or_else(|| lookup("DISCORD_TOKEN"))
            .ok_or_else(|| {
                WelcomeError::config("missing bot token; set WELCOMER_TOKEN or DISCORD_TOKEN")
            })?;

        let guild_id = lookup("WELCOMER_GUILD_ID")
            .ok_or_else(|| WelcomeError::config("missing WELCOMER_GUILD_ID"))?
            .parse::<GuildId>()?;

        let welcome_channel_id = lookup("WELCOMER_CHANNEL_ID")
            .ok_or_else(|| WelcomeError::config("missing WELCOMER_CHANNEL_ID"))?
            .parse::<ChannelId>()?;

        let assets = lookup("WELCOMER_ASSETS_DIR")
            .map(AssetPaths::in_dir)
            .unwrap_or_default();

        let output_dir = lookup("WELCOMER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        let avatar_timeout = match lookup("WELCOMER_AVATAR_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    WelcomeError::config(format!(
                        "invalid WELCOMER_AVATAR_TIMEOUT_SECS '{raw}': {e}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_AVATAR_TIMEOUT,
        };

        let config = Self {
            token,
            guild_id,
            welcome_channel_id,
            assets,
            output_dir,
            avatar_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot work at runtime (empty token, zero ids, zero timeout).
    pub fn validate(&self) -> WelcomeResult<()> {
        if self.token.trim().is_empty() {
            return Err(WelcomeError::config("bot token must be non-empty"));
        }
        if self.guild_id.0 == 0 {
            return Err(WelcomeError::config("guild id must be non-zero"));
        }
        if self.welcome_channel_id.0 == 0 {
            return Err(WelcomeError::config("welcome channel id must be non-zero"));
        }
        if self.avatar_timeout.is_zero() {
            return Err(WelcomeError::config("avatar timeout must be > 0"));
        }
        Ok(())
    }

    /// Replace the asset directory (CLI override).
    pub fn with_assets_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.assets = AssetPaths::in_dir(dir);
        self
    }

    /// Replace the output directory (CLI override).
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
