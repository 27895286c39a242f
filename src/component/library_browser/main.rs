use super::stats::LibraryStats;
use crate::config::Config;
use crate::library::{VideoLibraryStore, VideoMetadata};
use crate::component::video_importer::prompt_metadata;
use crate::tools::{
    format_duration, format_size, format_timestamp, generate_thumbnails_parallel, stat_file,
    uri_to_path,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 影片庫瀏覽器
pub struct LibraryBrowser {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl LibraryBrowser {
    #[must_use]
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self, term: &Term) -> Result<()> {
        let mut store = VideoLibraryStore::load(&self.config.snapshot_path())?;
        self.ensure_thumbnails(&store);

        loop {
            term.clear_screen()?;
            println!("{}", style(t!("browser.title")).cyan().bold());
            println!("{}", style(t!("common.esc_hint")).dim());

            let stats = LibraryStats::collect(store.records());
            println!(
                "\n{} {}  |  {} {}  |  {} {}",
                style(t!("browser.stats_count")).dim(),
                stats.clip_count,
                style(t!("browser.stats_duration")).dim(),
                format_duration(stats.total_duration_seconds),
                style(t!("browser.stats_size")).dim(),
                format_size(stats.total_size_bytes),
            );
            println!();

            if store.is_empty() {
                println!("{}", style(t!("browser.empty")).yellow());
                return Ok(());
            }

            let mut items: Vec<String> = store
                .records()
                .iter()
                .map(|record| {
                    let missing = if stat_file(&uri_to_path(&record.uri)).exists {
                        ""
                    } else {
                        " [!]"
                    };
                    format!(
                        "{} ({})  {}{missing}",
                        record.title,
                        format_duration(record.duration),
                        format_timestamp(record.created_at)
                    )
                })
                .collect();
            items.push(t!("browser.opt_delete_all").to_string());
            items.push(t!("browser.back").to_string());

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("browser.prompt"))
                .items(&items)
                .default(0)
                .interact_on_opt(term)?;

            match selection {
                Some(index) if index < store.len() => {
                    let id = store.records()[index].id.clone();
                    self.record_menu(term, &mut store, &id)?;
                }
                Some(index) if index == store.len() => {
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(t!("browser.delete_all_confirm"))
                        .default(false)
                        .interact_on_opt(term)?
                        .unwrap_or(false);
                    if confirmed {
                        store.delete_all()?;
                        println!("{}", style(t!("browser.deleted_all")).green());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// 單筆記錄的詳情選單
    fn record_menu(&self, term: &Term, store: &mut VideoLibraryStore, id: &str) -> Result<()> {
        loop {
            term.clear_screen()?;

            let Some(record) = store.find(id) else {
                return Ok(());
            };
            let current_title = record.title.clone();
            let current_description = record.description.clone();

            println!("{}", style(&record.title).cyan().bold());
            if !record.description.is_empty() {
                println!("{}", record.description);
            }
            println!();
            println!(
                "{} {}",
                style(t!("browser.field_duration")).dim(),
                format_duration(record.duration)
            );
            println!(
                "{} {}",
                style(t!("browser.field_created")).dim(),
                format_timestamp(record.created_at)
            );
            println!("{} {}", style(t!("browser.field_uri")).dim(), record.uri);
            if let Some(thumbnail) = &record.thumbnail_uri {
                println!("{} {thumbnail}", style(t!("browser.field_thumbnail")).dim());
            }

            // 播放前的存在性檢查：檔案可能已被系統清掉，
            // 降級為行內提示而非讓程式失敗
            let stat = stat_file(&uri_to_path(&record.uri));
            if stat.exists {
                println!(
                    "{} {}",
                    style(t!("browser.field_size")).dim(),
                    format_size(stat.size)
                );
            } else {
                println!("\n{}", style(t!("browser.file_missing")).red());
            }

            let options = vec![
                t!("browser.opt_edit"),
                t!("browser.opt_delete"),
                t!("browser.back"),
            ];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("browser.record_prompt"))
                .items(&options)
                .default(0)
                .interact_on_opt(term)?;

            match selection {
                Some(0) => {
                    let input = prompt_metadata(term, &current_title, &current_description)?;
                    let updated = store.update(
                        id,
                        &VideoMetadata {
                            title: Some(input.title),
                            description: Some(input.description),
                        },
                    )?;
                    if updated {
                        println!("{}", style(t!("browser.updated")).green());
                    }
                }
                Some(1) => {
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(t!("browser.delete_confirm"))
                        .default(false)
                        .interact_on_opt(term)?
                        .unwrap_or(false);
                    if confirmed {
                        store.delete(id)?;
                        println!("{}", style(t!("browser.deleted")).green());
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// 平行補齊缺少縮圖的記錄（僅處理影片檔仍存在者）
    fn ensure_thumbnails(&self, store: &VideoLibraryStore) {
        let missing: Vec<PathBuf> = store
            .records()
            .iter()
            .filter(|record| {
                let cached = record
                    .thumbnail_uri
                    .as_deref()
                    .is_some_and(|uri| stat_file(&uri_to_path(uri)).exists);
                !cached && stat_file(&uri_to_path(&record.uri)).exists
            })
            .map(|record| uri_to_path(&record.uri))
            .collect();

        if !missing.is_empty() {
            generate_thumbnails_parallel(
                &missing,
                &self.config.thumbnail_cache_dir(),
                &self.shutdown_signal,
            );
        }
    }
}
