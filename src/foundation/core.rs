use std::fmt;
use std::str::FromStr;

use crate::foundation::error::WelcomeError;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = WelcomeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self).map_err(|e| {
                    WelcomeError::config(format!("invalid {} '{s}': {e}", $what))
                })
            }
        }
    };
}

snowflake_id!(
    /// Identifier of a community server.
    GuildId,
    "guild id"
);
snowflake_id!(
    /// Identifier of a text channel.
    ChannelId,
    "channel id"
);
snowflake_id!(
    /// Identifier of a user / server member.
    MemberId,
    "member id"
);

/// A member who just joined a server, as handed over by the messaging platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// Account identifier; also names the card file.
    pub id: MemberId,
    /// Server the member joined.
    pub guild_id: GuildId,
    /// Account name interpolated into the greeting text.
    pub name: String,
    /// CDN URL of the custom avatar; `None` when the account uses the platform default.
    pub avatar_url: Option<String>,
}

impl Member {
    /// Mention markup that pings the member when embedded in a message.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
