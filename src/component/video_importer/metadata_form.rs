//! 標題與描述的輸入表單
//!
//! 限制僅為建議性（與行動版表單一致），儲存層不強制

use anyhow::Result;
use console::{Term, style};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;

pub const TITLE_MIN_CHARS: usize = 3;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct VideoMetadataInput {
    pub title: String,
    pub description: String,
}

pub fn prompt_metadata(
    term: &Term,
    default_title: &str,
    default_description: &str,
) -> Result<VideoMetadataInput> {
    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("metadata.title_prompt"))
        .default(default_title.to_string())
        .allow_empty(true)
        .interact_text_on(term)?;

    if title.chars().count() < TITLE_MIN_CHARS {
        println!("{}", style(t!("metadata.title_short")).yellow());
    }

    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("metadata.description_prompt"))
        .default(default_description.to_string())
        .allow_empty(true)
        .interact_text_on(term)?;

    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        println!("{}", style(t!("metadata.description_long")).yellow());
    }

    Ok(VideoMetadataInput { title, description })
}
