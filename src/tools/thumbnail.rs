//! 影片縮圖產生
//!
//! 縮圖只是裝飾，任何失敗都以遠端預留圖降級，絕不阻斷呼叫端

use crate::tools::file_tools::{ensure_directory_exists, stat_file};
use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 擷取失敗時回傳的遠端預留圖
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/640x360?text=Video+Preview";

/// 擷取畫面的固定時間點（秒）
const FRAME_OFFSET: &str = "00:00:01.000";

/// 由影片路徑最後一段導出確定性的快取檔名
///
/// 同名即重用、不做新鮮度檢查：輸出檔名帶 UUID，天然唯一
#[must_use]
pub fn thumbnail_cache_path(video_path: &Path, cache_dir: &Path) -> PathBuf {
    let file_name = video_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("video");
    cache_dir.join(format!("thumbnail_{file_name}.jpg"))
}

/// 產生影片的代表縮圖，回傳可顯示的 uri
///
/// 快取命中直接回傳；失敗回傳 [`PLACEHOLDER_THUMBNAIL`]
#[must_use]
pub fn generate_thumbnail(video_path: &Path, cache_dir: &Path) -> String {
    match generate_thumbnail_inner(video_path, cache_dir) {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("縮圖產生失敗，改用預留圖 {}: {e}", video_path.display());
            PLACEHOLDER_THUMBNAIL.to_string()
        }
    }
}

fn generate_thumbnail_inner(video_path: &Path, cache_dir: &Path) -> Result<PathBuf> {
    ensure_directory_exists(cache_dir)?;
    let cache_path = thumbnail_cache_path(video_path, cache_dir);

    if stat_file(&cache_path).exists {
        debug!("使用快取縮圖: {}", cache_path.display());
        return Ok(cache_path);
    }

    // 在固定 1 秒處擷取一幀
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y", "-i"])
        .arg(video_path)
        .args(["-ss", FRAME_OFFSET, "-vframes", "1", "-q:v", "1", "-threads", "1"])
        .arg(&cache_path)
        .output()
        .with_context(|| format!("無法執行 ffmpeg 擷取縮圖: {}", video_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffmpeg 縮圖擷取失敗: {}", stderr.trim());
    }

    let stat = stat_file(&cache_path);
    if !stat.exists || stat.size == 0 {
        bail!("縮圖檔案未建立: {}", cache_path.display());
    }

    Ok(cache_path)
}

/// 平行補齊多支影片的縮圖
///
/// 每個 ffmpeg 程序限制單執行緒以避免 CPU 過度訂閱；
/// 回傳的 uri 與輸入順序對齊
pub fn generate_thumbnails_parallel(
    video_paths: &[PathBuf],
    cache_dir: &Path,
    shutdown_signal: &Arc<AtomicBool>,
) -> Vec<String> {
    if video_paths.is_empty() {
        return Vec::new();
    }

    let progress_bar = ProgressBar::new(video_paths.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar.set_message("產生縮圖中...");

    let results: Vec<String> = video_paths
        .par_iter()
        .map(|video_path| {
            if shutdown_signal.load(Ordering::SeqCst) {
                return PLACEHOLDER_THUMBNAIL.to_string();
            }
            let uri = generate_thumbnail(video_path, cache_dir);
            progress_bar.inc(1);
            uri
        })
        .collect();

    progress_bar.finish_and_clear();
    results
}
