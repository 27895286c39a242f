//! 影片來源挑選
//!
//! 行動版挑選器的 CLI 對應：選資料夾（最近路徑優先）、
//! 掃描影片檔、互動選取。ESC 視為取消，是正常流程而非錯誤

use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::{format_size, scan_video_files, validate_directory_exists};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PickOutcome {
    Picked(PathBuf),
    Canceled,
}

pub fn pick_video(term: &Term, config: &mut Config) -> Result<PickOutcome> {
    let Some(directory) = prompt_source_directory(term, config)? else {
        return Ok(PickOutcome::Canceled);
    };

    // 路徑不存在或不可讀屬於阻斷性錯誤，往上回報
    validate_directory_exists(&directory)?;

    let videos = scan_video_files(&directory, &config.file_type_table)?;
    if videos.is_empty() {
        println!("{}", style(t!("importer.no_videos")).yellow());
        return Ok(PickOutcome::Canceled);
    }

    add_recent_path(&mut config.settings, &directory.to_string_lossy());
    save_settings(&config.settings)?;

    let items: Vec<String> = videos
        .iter()
        .map(|video| {
            let name = video
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{name} ({})", format_size(video.size))
        })
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("importer.pick_prompt"))
        .items(&items)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(index) => Ok(PickOutcome::Picked(videos[index].path.clone())),
        None => Ok(PickOutcome::Canceled),
    }
}

/// 詢問來源資料夾；最近使用的路徑列在最前面
fn prompt_source_directory(term: &Term, config: &Config) -> Result<Option<PathBuf>> {
    if !config.settings.recent_import_paths.is_empty() {
        let mut items = config.settings.recent_import_paths.clone();
        items.push(t!("importer.enter_path").to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("importer.source_prompt"))
            .items(&items)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            None => return Ok(None),
            Some(index) if index < config.settings.recent_import_paths.len() => {
                return Ok(Some(PathBuf::from(
                    &config.settings.recent_import_paths[index],
                )));
            }
            Some(_) => {}
        }
    }

    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("importer.path_prompt"))
        .allow_empty(true)
        .interact_text_on(term)?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(trimmed)))
}
