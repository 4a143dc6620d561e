//! Quality levels and the yt-dlp format policies they map to

/// Requested download quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    /// Best available streams
    Best,
    /// Smallest available streams
    Lowest,
}

impl Quality {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "best" => Some(Quality::Best),
            "lowest" | "worst" => Some(Quality::Lowest),
            _ => None,
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Best => write!(f, "best"),
            Quality::Lowest => write!(f, "lowest"),
        }
    }
}

/// Format selector for combined video+audio downloads.
///
/// Best prefers an mp4/m4a pairing so the merged file stays mp4,
/// falling back to the best overall stream yt-dlp can find.
pub fn video_format(quality: Quality) -> &'static str {
    match quality {
        Quality::Best => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best",
        Quality::Lowest => "worstvideo+worstaudio/worst",
    }
}

/// Format selector for audio-only downloads.
pub fn audio_format(quality: Quality) -> &'static str {
    match quality {
        Quality::Best => "bestaudio/best",
        Quality::Lowest => "worstaudio/worst",
    }
}

/// Bitrate tier (kbit/s) for the mp3 extraction post-processor.
pub fn audio_bitrate(quality: Quality) -> &'static str {
    match quality {
        Quality::Best => "192",
        Quality::Lowest => "64",
    }
}
