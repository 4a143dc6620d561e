//! ytgrab-core: the YouTube download contract and its yt-dlp adapter
//!
//! The contract is the [`YouTubeDownloader`] trait: two required
//! operations (video, playlist) plus an optional capability set that
//! defaults to typed "unsupported" errors. [`YtDlpDownloader`] is the
//! working variant, translating each operation into a yt-dlp argument
//! vector and running the engine to completion.

pub mod config;
pub mod downloader;
pub mod error;
pub mod metadata;
pub mod quality;
pub mod ytdlp;

pub use config::Config;
pub use downloader::{Capability, DownloadOptions, YouTubeDownloader};
pub use error::{DownloadError, Result, YtGrabError};
pub use quality::Quality;
pub use ytdlp::YtDlpDownloader;
