//! Downloader contract: the capability set and the `YouTubeDownloader` trait

use std::path::Path;

use async_trait::async_trait;

use crate::error::DownloadError;
use crate::quality::Quality;

/// Operations a downloader variant may support.
///
/// Optional trait methods report the capability they belong to when a
/// variant leaves them unimplemented, so callers get a typed
/// "unsupported" error instead of a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Video,
    Playlist,
    Audio,
    Subtitles,
    Thumbnail,
    Metadata,
    Description,
    CustomOptions,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Video => write!(f, "video"),
            Capability::Playlist => write!(f, "playlist"),
            Capability::Audio => write!(f, "audio"),
            Capability::Subtitles => write!(f, "subtitles"),
            Capability::Thumbnail => write!(f, "thumbnail"),
            Capability::Metadata => write!(f, "metadata"),
            Capability::Description => write!(f, "description"),
            Capability::CustomOptions => write!(f, "custom options"),
        }
    }
}

/// Caller-assembled options for a combined download.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Maximum video height in pixels (e.g. 1080)
    pub resolution: Option<u32>,
    /// Preferred container (e.g. "mp4", "webm")
    pub container: Option<String>,
    /// Audio track only
    pub audio_only: bool,
    /// Also write subtitles
    pub subtitles: bool,
    /// Also write the thumbnail
    pub thumbnail: bool,
    /// Also write the info JSON side-file
    pub metadata: bool,
    /// Also write the description side-file
    pub description: bool,
    /// Embed metadata tags into the media file
    pub tags: bool,
}

/// Contract for YouTube download variants.
///
/// `download_video` and `download_playlist` are required; everything
/// else defaults to [`DownloadError::Unsupported`] until a variant
/// overrides it. Implementers that override an optional method should
/// also extend [`YouTubeDownloader::supports`] to match.
#[async_trait]
pub trait YouTubeDownloader: Send + Sync {
    /// Directory downloads are written into. Created at construction
    /// time and relied upon, not re-checked, per call.
    fn download_dir(&self) -> &Path;

    /// Whether this variant implements the given operation.
    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Video | Capability::Playlist)
    }

    /// Download a single video.
    async fn download_video(&self, url: &str, quality: Quality) -> Result<(), DownloadError>;

    /// Download every item of a playlist.
    async fn download_playlist(&self, url: &str, quality: Quality) -> Result<(), DownloadError>;

    /// Download the audio track only.
    async fn download_audio(&self, url: &str, quality: Quality) -> Result<(), DownloadError> {
        let _ = (url, quality);
        Err(DownloadError::Unsupported(Capability::Audio))
    }

    /// Write the video description to a text file in the download directory.
    async fn download_description(&self, url: &str) -> Result<(), DownloadError> {
        let _ = url;
        Err(DownloadError::Unsupported(Capability::Description))
    }

    /// Download subtitles for a video.
    async fn download_subtitles(&self, url: &str) -> Result<(), DownloadError> {
        let _ = url;
        Err(DownloadError::Unsupported(Capability::Subtitles))
    }

    /// Download the video thumbnail.
    async fn download_thumbnail(&self, url: &str) -> Result<(), DownloadError> {
        let _ = url;
        Err(DownloadError::Unsupported(Capability::Thumbnail))
    }

    /// Download video metadata.
    async fn download_metadata(&self, url: &str) -> Result<(), DownloadError> {
        let _ = url;
        Err(DownloadError::Unsupported(Capability::Metadata))
    }

    /// Download with caller-assembled options.
    async fn download_with_options(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<(), DownloadError> {
        let _ = (url, options);
        Err(DownloadError::Unsupported(Capability::CustomOptions))
    }
}
