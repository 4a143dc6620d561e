//! yt-dlp backed implementation of the downloader contract

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::downloader::{Capability, DownloadOptions, YouTubeDownloader};
use crate::error::DownloadError;
use crate::metadata::{sanitize_filename, VideoMetadata};
use crate::quality::{self, Quality};

/// Downloader variant that shells out to yt-dlp.
///
/// Every operation builds a fresh argument vector from the base output
/// template and runs one engine process to completion. Engine failures
/// are classified from stderr but otherwise passed through; there is no
/// retry and no cleanup of partial files.
#[derive(Debug)]
pub struct YtDlpDownloader {
    yt_dlp_path: PathBuf,
    download_dir: PathBuf,
}

impl YtDlpDownloader {
    /// Creates the downloader and its target directory.
    ///
    /// The directory tree is created up front (idempotent); downloads
    /// rely on it existing rather than re-checking per call.
    pub fn new(yt_dlp_path: PathBuf, download_dir: PathBuf) -> Result<Self, DownloadError> {
        std::fs::create_dir_all(&download_dir)?;
        Ok(Self { yt_dlp_path, download_dir })
    }

    /// `<download_dir>/%(title)s.%(ext)s`
    fn output_template(&self) -> OsString {
        let mut tmpl = OsString::from(self.download_dir.as_os_str());
        tmpl.push("/%(title)s.%(ext)s");
        tmpl
    }

    /// Playlist items land in a per-playlist directory, index-prefixed
    /// so filenames preserve source ordering.
    fn playlist_output_template(&self) -> OsString {
        let mut tmpl = OsString::from(self.download_dir.as_os_str());
        tmpl.push("/%(playlist_title)s/%(playlist_index)s-%(title)s.%(ext)s");
        tmpl
    }

    fn video_args(&self, url: &str, quality: Quality) -> Vec<OsString> {
        vec![
            OsString::from("-f"),
            OsString::from(quality::video_format(quality)),
            OsString::from("-o"),
            self.output_template(),
            OsString::from(url),
        ]
    }

    fn playlist_args(&self, url: &str, quality: Quality) -> Vec<OsString> {
        vec![
            OsString::from("-f"),
            OsString::from(quality::video_format(quality)),
            // One broken item must not abort the rest of the playlist
            OsString::from("--ignore-errors"),
            OsString::from("-o"),
            self.playlist_output_template(),
            OsString::from(url),
        ]
    }

    fn audio_args(&self, url: &str, quality: Quality) -> Vec<OsString> {
        vec![
            OsString::from("-f"),
            OsString::from(quality::audio_format(quality)),
            // Transcode to mp3 after download (needs ffmpeg)
            OsString::from("--extract-audio"),
            OsString::from("--audio-format"),
            OsString::from("mp3"),
            OsString::from("--audio-quality"),
            OsString::from(quality::audio_bitrate(quality)),
            OsString::from("-o"),
            self.output_template(),
            OsString::from(url),
        ]
    }

    /// No media download: write the engine's .info.json side-file and
    /// print the info dict to stdout for parsing.
    fn description_args(&self, url: &str) -> Vec<OsString> {
        let mut tmpl = OsString::from(self.download_dir.as_os_str());
        tmpl.push("/%(title)s");
        vec![
            OsString::from("--quiet"),
            OsString::from("--no-warnings"),
            OsString::from("--skip-download"),
            OsString::from("--no-simulate"),
            OsString::from("--dump-json"),
            OsString::from("--write-info-json"),
            OsString::from("-o"),
            tmpl,
            OsString::from(url),
        ]
    }

    fn options_args(&self, url: &str, options: &DownloadOptions) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-f"),
            OsString::from(build_format_selector(options)),
        ];
        if options.subtitles {
            args.push(OsString::from("--write-subs"));
        }
        if options.thumbnail {
            args.push(OsString::from("--write-thumbnail"));
        }
        if options.description {
            args.push(OsString::from("--write-description"));
        }
        if options.metadata {
            args.push(OsString::from("--write-info-json"));
        }
        if options.tags {
            args.push(OsString::from("--embed-metadata"));
        }
        args.push(OsString::from("-o"));
        args.push(self.output_template());
        args.push(OsString::from(url));
        args
    }

    /// Run one engine process to completion and classify failures.
    async fn run(&self, url: &str, args: Vec<OsString>) -> Result<std::process::Output, DownloadError> {
        debug!("Invoking yt-dlp for {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DownloadError::YtDlpNotFound
                } else {
                    DownloadError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);

            if stderr.contains("Video unavailable") || stderr.contains("Private video") {
                return Err(DownloadError::VideoUnavailable(url.to_string()));
            }
            if stderr.contains("is not a valid URL") {
                return Err(DownloadError::InvalidUrl(url.to_string()));
            }

            return Err(DownloadError::YtDlpFailed(output.status.code()));
        }

        Ok(output)
    }
}

#[async_trait]
impl YouTubeDownloader for YtDlpDownloader {
    fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::Video
                | Capability::Playlist
                | Capability::Audio
                | Capability::Description
                | Capability::CustomOptions
        )
    }

    async fn download_video(&self, url: &str, quality: Quality) -> Result<(), DownloadError> {
        info!("Downloading video ({}): {}", quality, url);
        self.run(url, self.video_args(url, quality)).await?;
        Ok(())
    }

    async fn download_playlist(&self, url: &str, quality: Quality) -> Result<(), DownloadError> {
        info!("Downloading playlist ({}): {}", quality, url);
        self.run(url, self.playlist_args(url, quality)).await?;
        Ok(())
    }

    async fn download_audio(&self, url: &str, quality: Quality) -> Result<(), DownloadError> {
        info!("Downloading audio ({}): {}", quality, url);
        self.run(url, self.audio_args(url, quality)).await?;
        Ok(())
    }

    async fn download_description(&self, url: &str) -> Result<(), DownloadError> {
        info!("Fetching description: {}", url);
        let output = self.run(url, self.description_args(url)).await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let metadata: VideoMetadata = serde_json::from_str(stdout.trim())
            .map_err(|e| DownloadError::MetadataParse(e.to_string()))?;

        let path = write_description_file(&self.download_dir, &metadata).await?;
        debug!("Wrote description to {}", path.display());
        Ok(())
    }

    async fn download_with_options(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<(), DownloadError> {
        info!("Downloading with options: {}", url);
        self.run(url, self.options_args(url, options)).await?;
        Ok(())
    }
}

/// Compose a yt-dlp format selector from the combined-download options.
fn build_format_selector(options: &DownloadOptions) -> String {
    if options.audio_only {
        return quality::audio_format(Quality::Best).to_string();
    }

    let mut filters = Vec::new();
    if let Some(height) = options.resolution {
        filters.push(format!("height<={height}"));
    }
    if let Some(ref container) = options.container {
        filters.push(format!("ext={container}"));
    }

    let mut video = String::from("bestvideo");
    if !filters.is_empty() {
        video.push('[');
        video.push_str(&filters.join("]["));
        video.push(']');
    }

    format!("{video}+bestaudio/best")
}

/// A missing description still produces the file, containing an empty
/// string. The title is sanitized because it comes straight from the
/// video metadata.
async fn write_description_file(
    dir: &Path,
    metadata: &VideoMetadata,
) -> Result<PathBuf, DownloadError> {
    let path = dir.join(format!("{}.description.txt", sanitize_filename(&metadata.title)));
    tokio::fs::write(&path, metadata.description.as_deref().unwrap_or_default()).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader(dir: &Path) -> YtDlpDownloader {
        YtDlpDownloader::new(PathBuf::from("yt-dlp"), dir.to_path_buf()).unwrap()
    }

    fn as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn new_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("videos").join("music");
        assert!(!target.exists());

        let dl = downloader(&target);
        assert!(target.is_dir());
        assert_eq!(dl.download_dir(), target);

        // Idempotent over an existing directory
        downloader(&target);
        assert!(target.is_dir());
    }

    #[test]
    fn video_args_map_quality_to_format_selector() {
        let tmp = tempfile::tempdir().unwrap();
        let dl = downloader(tmp.path());
        let url = "https://youtu.be/dQw4w9WgXcQ";

        let best = as_strings(&dl.video_args(url, Quality::Best));
        let lowest = as_strings(&dl.video_args(url, Quality::Lowest));

        assert!(best.contains(&"bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string()));
        assert!(lowest.contains(&"worstvideo+worstaudio/worst".to_string()));
        assert!(best.iter().any(|a| a.ends_with("/%(title)s.%(ext)s")));
        assert_eq!(best.last().unwrap(), url);
    }

    #[test]
    fn playlist_args_tolerate_item_errors_and_keep_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dl = downloader(tmp.path());

        let args = as_strings(&dl.playlist_args("https://youtube.com/playlist?list=PL1", Quality::Best));

        assert!(args.contains(&"--ignore-errors".to_string()));
        assert!(args
            .iter()
            .any(|a| a.ends_with("/%(playlist_title)s/%(playlist_index)s-%(title)s.%(ext)s")));
        // Playlist downloads use the same format policy as single videos
        assert!(args.contains(&"bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string()));
    }

    #[test]
    fn audio_args_attach_mp3_postprocessor() {
        let tmp = tempfile::tempdir().unwrap();
        let dl = downloader(tmp.path());
        let url = "https://youtu.be/dQw4w9WgXcQ";

        let best = as_strings(&dl.audio_args(url, Quality::Best));
        let lowest = as_strings(&dl.audio_args(url, Quality::Lowest));

        assert!(best.contains(&"bestaudio/best".to_string()));
        assert!(lowest.contains(&"worstaudio/worst".to_string()));

        for args in [&best, &lowest] {
            assert!(args.contains(&"--extract-audio".to_string()));
            let pos = args.iter().position(|a| a == "--audio-format").unwrap();
            assert_eq!(args[pos + 1], "mp3");
        }
        let pos = best.iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(best[pos + 1], "192");
        let pos = lowest.iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(lowest[pos + 1], "64");
    }

    #[test]
    fn description_args_skip_media_download() {
        let tmp = tempfile::tempdir().unwrap();
        let dl = downloader(tmp.path());

        let args = as_strings(&dl.description_args("https://youtu.be/dQw4w9WgXcQ"));

        assert!(args.contains(&"--skip-download".to_string()));
        assert!(args.contains(&"--write-info-json".to_string()));
        assert!(args.contains(&"--dump-json".to_string()));
        assert!(args.contains(&"--quiet".to_string()));
        assert!(args.iter().any(|a| a.ends_with("/%(title)s")));
    }

    #[test]
    fn format_selector_respects_resolution_and_container() {
        let plain = build_format_selector(&DownloadOptions::default());
        assert_eq!(plain, "bestvideo+bestaudio/best");

        let capped = build_format_selector(&DownloadOptions {
            resolution: Some(1080),
            container: Some("mp4".to_string()),
            ..Default::default()
        });
        assert_eq!(capped, "bestvideo[height<=1080][ext=mp4]+bestaudio/best");

        let audio = build_format_selector(&DownloadOptions {
            audio_only: true,
            resolution: Some(720),
            ..Default::default()
        });
        assert_eq!(audio, "bestaudio/best");
    }

    #[test]
    fn options_args_translate_toggles() {
        let tmp = tempfile::tempdir().unwrap();
        let dl = downloader(tmp.path());

        let args = as_strings(&dl.options_args(
            "https://youtu.be/dQw4w9WgXcQ",
            &DownloadOptions {
                subtitles: true,
                thumbnail: true,
                description: true,
                metadata: true,
                tags: true,
                ..Default::default()
            },
        ));

        for flag in [
            "--write-subs",
            "--write-thumbnail",
            "--write-description",
            "--write-info-json",
            "--embed-metadata",
        ] {
            assert!(args.contains(&flag.to_string()), "missing {flag}");
        }

        let none = as_strings(&dl.options_args(
            "https://youtu.be/dQw4w9WgXcQ",
            &DownloadOptions::default(),
        ));
        assert!(!none.contains(&"--write-subs".to_string()));
    }

    #[tokio::test]
    async fn missing_description_writes_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let meta: VideoMetadata =
            serde_json::from_str(r#"{"id": "abc123", "title": "No Description Here"}"#).unwrap();

        let path = write_description_file(tmp.path(), &meta).await.unwrap();

        assert_eq!(path, tmp.path().join("No Description Here.description.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn description_file_named_after_sanitized_title() {
        let tmp = tempfile::tempdir().unwrap();
        let meta: VideoMetadata = serde_json::from_str(
            r#"{"id": "abc123", "title": "AC/DC: Live", "description": "tour footage"}"#,
        )
        .unwrap();

        let path = write_description_file(tmp.path(), &meta).await.unwrap();

        assert_eq!(path, tmp.path().join("AC_DC_ Live.description.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "tour footage");
    }

    #[tokio::test]
    async fn subtitles_thumbnail_metadata_are_unsupported() {
        let tmp = tempfile::tempdir().unwrap();
        let dl = downloader(tmp.path());
        let url = "https://youtu.be/dQw4w9WgXcQ";

        assert!(matches!(
            dl.download_subtitles(url).await,
            Err(DownloadError::Unsupported(Capability::Subtitles))
        ));
        assert!(matches!(
            dl.download_thumbnail(url).await,
            Err(DownloadError::Unsupported(Capability::Thumbnail))
        ));
        assert!(matches!(
            dl.download_metadata(url).await,
            Err(DownloadError::Unsupported(Capability::Metadata))
        ));

        assert!(!dl.supports(Capability::Subtitles));
        assert!(!dl.supports(Capability::Thumbnail));
        assert!(!dl.supports(Capability::Metadata));
        assert!(dl.supports(Capability::Audio));
        assert!(dl.supports(Capability::Description));
        assert!(dl.supports(Capability::CustomOptions));
    }
}
