//! 影片中繼資料探測
//!
//! 優先使用 ffprobe 的結構化 JSON 輸出；失敗時退回解析
//! `ffmpeg -i` 的人類可讀日誌（`Duration: HH:MM:SS.ff` 為與
//! 外部轉檔器版本的固定約定）

use anyhow::{Context, Result, bail};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn get_video_info(path: &Path) -> Result<VideoInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {stderr}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let probe: FfprobeOutput =
        serde_json::from_str(&stdout).with_context(|| "無法解析 ffprobe 輸出")?;

    // 找到視訊串流
    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| anyhow::anyhow!("找不到視訊串流: {}", path.display()))?;

    let width = video_stream
        .width
        .ok_or_else(|| anyhow::anyhow!("無法取得影片寬度"))?;
    let height = video_stream
        .height
        .ok_or_else(|| anyhow::anyhow!("無法取得影片高度"))?;

    // 取得影片長度（優先從 format，其次從 stream）
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or(video_stream.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow::anyhow!("無法取得影片長度"))?;

    Ok(VideoInfo {
        duration_seconds,
        width,
        height,
    })
}

/// 探測影片長度（秒）
///
/// 絕不失敗：結構化探測與日誌解析都找不到時回傳 `0`，
/// 呼叫端必須把 `0` 視為「未知」而非零長度影片
#[must_use]
pub fn probe_duration(path: &Path) -> f64 {
    if let Ok(info) = get_video_info(path)
        && info.duration_seconds > 0.0
    {
        return info.duration_seconds;
    }

    // 備用：`ffmpeg -i` 不產生輸出檔，僅為了日誌中的 Duration 行
    let log = match Command::new("ffmpeg")
        .args(["-hide_banner", "-i"])
        .arg(path)
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stderr).into_owned(),
        Err(e) => {
            debug!("無法執行 ffmpeg 探測 {}: {e}", path.display());
            return 0.0;
        }
    };

    parse_duration_from_log(&log).unwrap_or(0.0)
}

/// 從 ffmpeg 日誌解析 `Duration: HH:MM:SS.ff`
#[must_use]
pub fn parse_duration_from_log(log: &str) -> Option<f64> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"Duration: (\d{2}):(\d{2}):(\d{2}(?:\.\d+)?)").expect("invalid duration regex")
    });

    let captures = pattern.captures(log)?;
    let hours: f64 = captures[1].parse().ok()?;
    let minutes: f64 = captures[2].parse().ok()?;
    let seconds: f64 = captures[3].parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
