use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use ytgrab_core::{
    config::Config,
    downloader::DownloadOptions,
    metadata::validate_youtube_url,
    DownloadError, Quality, YouTubeDownloader, YtDlpDownloader,
};

use crate::args::{DownloadArgs, FetchArgs};

pub async fn video(url: &str, options: &DownloadArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let downloader = build_downloader(&config, options.output.as_deref())?;
    let quality = resolve_quality(&config, options.quality.map(Into::into));
    check_url(url)?;

    let pb = spinner(format!("Downloading video: {url}"));
    let result = downloader.download_video(url, quality).await;
    finish(&pb, &result);
    result?;

    println!("Saved to {}", downloader.download_dir().display());
    Ok(())
}

pub async fn playlist(url: &str, options: &DownloadArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let downloader = build_downloader(&config, options.output.as_deref())?;
    let quality = resolve_quality(&config, options.quality.map(Into::into));
    check_url(url)?;

    let pb = spinner(format!("Downloading playlist: {url}"));
    let result = downloader.download_playlist(url, quality).await;
    finish(&pb, &result);
    result?;

    println!("Saved to {}", downloader.download_dir().display());
    Ok(())
}

pub async fn audio(url: &str, options: &DownloadArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let downloader = build_downloader(&config, options.output.as_deref())?;
    let quality = resolve_quality(&config, options.quality.map(Into::into));
    check_url(url)?;

    let pb = spinner(format!("Downloading audio: {url}"));
    let result = downloader.download_audio(url, quality).await;
    finish(&pb, &result);
    result?;

    println!("Saved to {}", downloader.download_dir().display());
    Ok(())
}

pub async fn description(url: &str, output: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let downloader = build_downloader(&config, output)?;
    check_url(url)?;

    let pb = spinner(format!("Fetching description: {url}"));
    let result = downloader.download_description(url).await;
    finish(&pb, &result);
    result?;

    println!("Saved to {}", downloader.download_dir().display());
    Ok(())
}

pub async fn fetch(url: &str, options: &FetchArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let downloader = build_downloader(&config, options.output.as_deref())?;
    check_url(url)?;

    let download_options = DownloadOptions {
        resolution: options.resolution,
        container: options.container.clone(),
        audio_only: options.audio_only,
        subtitles: options.subtitles,
        thumbnail: options.thumbnail,
        metadata: options.metadata,
        description: options.description,
        tags: options.tags,
    };

    let pb = spinner(format!("Downloading: {url}"));
    let result = downloader.download_with_options(url, &download_options).await;
    finish(&pb, &result);
    result?;

    println!("Saved to {}", downloader.download_dir().display());
    Ok(())
}

fn build_downloader(config: &Config, output: Option<&Path>) -> Result<YtDlpDownloader> {
    let yt_dlp = config.yt_dlp_path()?;
    let dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output.default_directory.clone());
    Ok(YtDlpDownloader::new(yt_dlp, dir)?)
}

fn resolve_quality(config: &Config, arg: Option<Quality>) -> Quality {
    arg.unwrap_or_else(|| config.default_quality())
}

fn check_url(url: &str) -> Result<()> {
    if !validate_youtube_url(url) {
        bail!("not a YouTube URL: {url}");
    }
    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("=>-"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn finish(pb: &ProgressBar, result: &Result<(), DownloadError>) {
    match result {
        Ok(()) => pb.finish_with_message("Done"),
        Err(e) => pb.abandon_with_message(format!("Failed: {e}")),
    }
}
