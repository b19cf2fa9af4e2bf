/// Convenience result type used across the welcome pipeline.
pub type WelcomeResult<T> = Result<T, WelcomeError>;

/// Top-level error taxonomy for the bot.
#[derive(thiserror::Error, Debug)]
pub enum WelcomeError {
    /// Missing or malformed start-up configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A static asset (background, avatar, overlay, font) could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure while compositing or encoding the welcome card.
    #[error("render error: {0}")]
    Render(String),

    /// Avatar download or decode failure.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The messaging platform rejected or failed an outbound message.
    #[error("send error: {0}")]
    Send(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WelcomeError {
    /// Build a [`WelcomeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WelcomeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`WelcomeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WelcomeError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`WelcomeError::Send`] value.
    pub fn send(msg: impl Into<String>) -> Self {
        Self::Send(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
