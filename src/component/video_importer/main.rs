use super::metadata_form::prompt_metadata;
use super::picker::{PickOutcome, pick_video};
use crate::config::Config;
use crate::error::JournalError;
use crate::library::{VideoLibraryStore, VideoRecord};
use crate::tools::{
    ConvertOutcome, TranscodeEngine, ensure_directory_exists, format_duration, generate_thumbnail,
    get_video_info, probe_duration,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rust_i18n::t;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 影片匯入器
///
/// 整個流程是單一順序操作：選單迴圈保證同一時間只有
/// 一個匯入在執行，不會有並行的轉檔
pub struct VideoImporter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl VideoImporter {
    #[must_use]
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&mut self, term: &Term) -> Result<()> {
        println!("{}", style(t!("importer.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());
        ensure_directory_exists(&self.config.settings.library_dir)?;

        let source = match pick_video(term, &mut self.config)? {
            PickOutcome::Picked(path) => path,
            PickOutcome::Canceled => {
                // 取消是正常流程，安靜地回到選單
                println!("{}", style(t!("importer.canceled")).dim());
                return Ok(());
            }
        };

        let engine = TranscodeEngine::new(&self.config.settings.library_dir);

        // 容器正規化：失敗時沿用原始檔，流程繼續
        let spinner = spinner(t!("importer.normalizing"));
        let outcome = engine.ensure_compatible_container(&source);
        spinner.finish_and_clear();
        if let ConvertOutcome::Converted(path) = &outcome {
            println!("{} {}", style(t!("importer.converted")).dim(), path.display());
        }
        let working = outcome.into_path();

        let source_duration = probe_duration(&working);
        self.print_source_summary(&working, source_duration);

        let (start, end) = prompt_trim_range(term, source_duration)?;

        if self.shutdown_signal.load(Ordering::SeqCst) {
            return Ok(());
        }

        // 轉檔一旦送出就跑到結束，期間無法取消
        let spinner = self::spinner(t!("importer.trimming"));
        let result = engine.trim(&working, start, end);
        spinner.finish_and_clear();

        let output = match result {
            Ok(output) => output,
            Err(JournalError::TrimFailed { log }) => {
                eprintln!(
                    "{}\n{}",
                    style(t!("importer.trim_failed")).red().bold(),
                    style(log_excerpt(&log)).dim()
                );
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        // 長度建立時探測一次；0 表示未知，照樣儲存
        let duration = probe_duration(&output);
        let thumbnail_uri = generate_thumbnail(&output, &self.config.thumbnail_cache_dir());

        let default_title = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let metadata = prompt_metadata(term, default_title, "")?;

        let mut store = VideoLibraryStore::load(&self.config.snapshot_path())?;
        let record = VideoRecord::new(
            metadata.title,
            metadata.description,
            output.to_string_lossy().into_owned(),
            duration,
            Some(thumbnail_uri),
        );
        let title = record.title.clone();
        store.add(record)?;

        info!("匯入完成: {} -> {}", source.display(), output.display());
        println!("\n{} {title}", style(t!("importer.saved")).green().bold());
        Ok(())
    }

    fn print_source_summary(&self, path: &Path, source_duration: f64) {
        if source_duration > 0.0 {
            println!(
                "{} {}",
                t!("importer.source_duration"),
                style(format_duration(source_duration)).bold()
            );
        } else {
            println!("{}", style(t!("importer.duration_unknown")).yellow());
        }

        if let Ok(video_info) = get_video_info(path) {
            println!(
                "{} {}x{}",
                t!("importer.resolution"),
                video_info.width,
                video_info.height
            );
        }
    }
}

/// 詢問剪輯範圍直到合法為止
///
/// 來源長度未知（0）時不檢查上限
fn prompt_trim_range(term: &Term, source_duration: f64) -> Result<(f64, f64)> {
    loop {
        let start: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("importer.start_prompt"))
            .default(0.0)
            .interact_text_on(term)?;

        let default_end = if source_duration > 0.0 {
            source_duration
        } else {
            start + 10.0
        };
        let end: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("importer.end_prompt"))
            .default(default_end)
            .interact_text_on(term)?;

        let valid =
            start >= 0.0 && start < end && (source_duration <= 0.0 || end <= source_duration);
        if valid {
            return Ok((start, end));
        }
        println!("{}", style(t!("importer.invalid_range")).yellow());
    }
}

fn spinner(message: Cow<'static, str>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// 取日誌末尾數行作為使用者可讀的摘要
fn log_excerpt(log: &str) -> String {
    let mut lines: Vec<&str> = log.lines().rev().take(4).collect();
    lines.reverse();
    lines.join("\n")
}
