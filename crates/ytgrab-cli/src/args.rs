use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ytgrab_core::Quality;

#[derive(Parser)]
#[command(name = "ytgrab")]
#[command(author, version, about = "YouTube video, playlist and audio downloader built on yt-dlp")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a single video
    Video {
        /// YouTube URL
        url: String,

        #[command(flatten)]
        options: DownloadArgs,
    },

    /// Download every item of a playlist
    Playlist {
        /// YouTube playlist URL
        url: String,

        #[command(flatten)]
        options: DownloadArgs,
    },

    /// Download the audio track as mp3
    Audio {
        /// YouTube URL
        url: String,

        #[command(flatten)]
        options: DownloadArgs,
    },

    /// Save the video description to a text file
    Description {
        /// YouTube URL
        url: String,

        /// Download directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download with custom format and side-file options
    Fetch {
        /// YouTube URL
        url: String,

        #[command(flatten)]
        options: FetchArgs,
    },

    /// Check that yt-dlp and ffmpeg are installed
    Doctor,

    /// Show the effective configuration
    Config,
}

#[derive(clap::Args, Clone)]
pub struct DownloadArgs {
    /// Download quality (defaults to the configured quality)
    #[arg(short, long, value_enum)]
    pub quality: Option<QualityArg>,

    /// Download directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Clone)]
pub struct FetchArgs {
    /// Maximum video height (e.g. 1080)
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Preferred container (e.g. mp4, webm)
    #[arg(long)]
    pub container: Option<String>,

    /// Audio track only
    #[arg(long)]
    pub audio_only: bool,

    /// Also write subtitles
    #[arg(long)]
    pub subtitles: bool,

    /// Also write the thumbnail
    #[arg(long)]
    pub thumbnail: bool,

    /// Also write the info JSON side-file
    #[arg(long)]
    pub metadata: bool,

    /// Also write the description side-file
    #[arg(long)]
    pub description: bool,

    /// Embed metadata tags into the media file
    #[arg(long)]
    pub tags: bool,

    /// Download directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityArg {
    /// Best available video+audio
    Best,
    /// Smallest available streams
    Lowest,
}

impl From<QualityArg> for Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Best => Quality::Best,
            QualityArg::Lowest => Quality::Lowest,
        }
    }
}
