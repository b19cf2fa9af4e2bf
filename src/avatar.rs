//! Avatar download for the joining member.

use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use image::RgbaImage;

use crate::assets::decode::decode_rgba;
use crate::foundation::core::Member;
use crate::foundation::error::{WelcomeError, WelcomeResult};

/// Outcome of an avatar lookup. Failures collapse into [`FetchResult::NoAvatar`].
#[derive(Clone, Debug, PartialEq)]
pub enum FetchResult {
    /// Decoded straight-alpha RGBA8 avatar.
    Avatar(RgbaImage),
    /// No custom avatar, or it could not be downloaded or decoded.
    NoAvatar,
}

impl FetchResult {
    /// The decoded avatar, if any.
    pub fn as_image(&self) -> Option<&RgbaImage> {
        match self {
            Self::Avatar(img) => Some(img),
            Self::NoAvatar => None,
        }
    }
}

/// Source of member avatars.
#[async_trait]
pub trait AvatarSource: Send + Sync {
    /// Look up and decode `member`'s avatar. Never fails; errors become `NoAvatar`.
    async fn fetch(&self, member: &Member) -> FetchResult;
}

/// Downloads avatars over HTTP(S) with a bounded total timeout.
#[derive(Clone)]
pub struct HttpAvatarFetcher {
    client: reqwest::Client,
}

impl HttpAvatarFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> WelcomeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to create avatar HTTP client")?;
        Ok(Self { client })
    }

    /// GET `url`, require a 200, and decode the body.
    pub async fn download(&self, url: &str) -> WelcomeResult<RgbaImage> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WelcomeError::fetch(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(WelcomeError::fetch(format!(
                "avatar request returned HTTP {status}"
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| WelcomeError::fetch(format!("reading avatar body failed: {e}")))?;
        decode_rgba(&body)
    }
}

#[async_trait]
impl AvatarSource for HttpAvatarFetcher {
    async fn fetch(&self, member: &Member) -> FetchResult {
        let Some(url) = member.avatar_url.as_deref() else {
            return FetchResult::NoAvatar;
        };
        match self.download(url).await {
            Ok(img) => FetchResult::Avatar(img),
            Err(e) => {
                tracing::warn!(member = %member.id, error = %e, "avatar unavailable, using none");
                FetchResult::NoAvatar
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/avatar.rs"]
mod tests;
