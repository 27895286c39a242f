//! 外部轉檔器（ffmpeg）包裝
//!
//! 負責剪輯、容器轉換與輸出驗證。剪輯永遠寫到新檔案，
//! 絕不修改來源檔

use crate::error::JournalError;
use crate::tools::file_tools::{remove_file_best_effort, stat_file};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// 剪輯輸出使用的目標容器副檔名
pub const TARGET_CONTAINER_EXT: &str = "mp4";

/// 容器正規化的結果，讓呼叫端（與測試）能分辨走了哪條路
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// 已重新編碼為目標容器
    Converted(PathBuf),
    /// 未轉換，沿用原始檔案（已相容，或轉換失敗的寬容降級）
    Passthrough(PathBuf),
}

impl ConvertOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Converted(path) | Self::Passthrough(path) => path,
        }
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Converted(path) | Self::Passthrough(path) => path,
        }
    }
}

/// 單次外部程序執行的結果
#[derive(Debug)]
pub struct RunOutcome {
    pub success: bool,
    pub log: String,
}

fn run_ffmpeg(args: &[String]) -> RunOutcome {
    debug!("ffmpeg {}", args.join(" "));

    match Command::new("ffmpeg").args(args).output() {
        Ok(output) => RunOutcome {
            success: output.status.success(),
            log: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(e) => RunOutcome {
            success: false,
            log: format!("無法執行 ffmpeg: {e}"),
        },
    }
}

/// 輸出檔必須存在且大小大於零，外部程序回報成功不足為憑
fn validate_output(path: &Path) -> bool {
    let stat = stat_file(path);
    stat.exists && stat.size > 0
}

pub struct TranscodeEngine {
    output_dir: PathBuf,
}

impl TranscodeEngine {
    #[must_use]
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    fn generate_output_path(&self, prefix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{prefix}_{}.{TARGET_CONTAINER_EXT}", Uuid::new_v4().simple()))
    }

    /// 剪輯 `[start, end)` 範圍到新產生的輸出檔
    ///
    /// 主要策略：以 H.264/AAC 重新編碼、`yuv420p` 像素格式、
    /// faststart 中繼資料前置。主要策略失敗（外部程序回報失敗，
    /// 或輸出檔不存在／大小為零）時，改以串流複製剪輯重試一次；
    /// 兩者皆失敗才回報 [`JournalError::TrimFailed`] 並附上日誌
    pub fn trim(
        &self,
        source: &Path,
        start_seconds: f64,
        end_seconds: f64,
    ) -> Result<PathBuf, JournalError> {
        self.trim_with_runner(source, start_seconds, end_seconds, run_ffmpeg)
    }

    fn trim_with_runner(
        &self,
        source: &Path,
        start_seconds: f64,
        end_seconds: f64,
        runner: impl Fn(&[String]) -> RunOutcome,
    ) -> Result<PathBuf, JournalError> {
        if !(start_seconds >= 0.0 && start_seconds < end_seconds) {
            return Err(JournalError::InvalidTrimRange {
                start: start_seconds,
                end: end_seconds,
            });
        }

        let duration = end_seconds - start_seconds;
        let output = self.generate_output_path("trimmed");
        let primary_args = build_args(&[
            "-i",
            &source.to_string_lossy(),
            "-ss",
            &format!("{start_seconds}"),
            "-t",
            &format!("{duration}"),
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
            &output.to_string_lossy(),
        ]);

        let primary = runner(&primary_args);
        if primary.success && validate_output(&output) {
            info!("剪輯完成: {}", output.display());
            return Ok(output);
        }

        // 主要策略留下的空檔或殘檔不保留
        if stat_file(&output).exists {
            remove_file_best_effort(&output);
        }
        warn!("主要剪輯策略失敗，改以串流複製重試");

        let fallback_output = self.generate_output_path("trimmed_alt");
        let fallback_args = build_args(&[
            "-i",
            &source.to_string_lossy(),
            "-ss",
            &format!("{start_seconds}"),
            "-to",
            &format!("{end_seconds}"),
            "-c",
            "copy",
            &fallback_output.to_string_lossy(),
        ]);

        let fallback = runner(&fallback_args);
        if fallback.success && validate_output(&fallback_output) {
            info!("備用剪輯完成: {}", fallback_output.display());
            return Ok(fallback_output);
        }

        if stat_file(&fallback_output).exists {
            remove_file_best_effort(&fallback_output);
        }

        let log = if fallback.log.trim().is_empty() {
            primary.log
        } else {
            fallback.log
        };
        Err(JournalError::TrimFailed { log })
    }

    /// 確保來源在可轉檔的容器內；只看副檔名，不做內容偵測
    ///
    /// 轉換失敗採寬容降級：沿用原始檔案而非回報錯誤
    #[must_use]
    pub fn ensure_compatible_container(&self, source: &Path) -> ConvertOutcome {
        self.ensure_compatible_container_with_runner(source, run_ffmpeg)
    }

    fn ensure_compatible_container_with_runner(
        &self,
        source: &Path,
        runner: impl Fn(&[String]) -> RunOutcome,
    ) -> ConvertOutcome {
        let already_compatible = source
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TARGET_CONTAINER_EXT));

        if already_compatible {
            debug!("容器已相容: {}", source.display());
            return ConvertOutcome::Passthrough(source.to_path_buf());
        }

        let output = self.generate_output_path("converted");
        let args = build_args(&[
            "-i",
            &source.to_string_lossy(),
            "-c:v",
            "libx264",
            "-preset",
            "ultrafast",
            "-c:a",
            "aac",
            &output.to_string_lossy(),
        ]);

        let run = runner(&args);
        if run.success && validate_output(&output) {
            info!("容器轉換完成: {}", output.display());
            return ConvertOutcome::Converted(output);
        }

        if stat_file(&output).exists {
            remove_file_best_effort(&output);
        }
        warn!("容器轉換失敗，沿用原始檔案: {}", run.log.trim());
        ConvertOutcome::Passthrough(source.to_path_buf())
    }
}

/// 共通的執行前綴加上操作專屬參數
fn build_args(tail: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]
        .iter()
        .map(ToString::to_string)
        .collect();
    args.extend(tail.iter().map(ToString::to_string));
    args
}
