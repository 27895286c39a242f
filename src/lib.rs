pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod library;
pub mod menu;
pub mod signal;
pub mod tools;

use anyhow::Result;
use console::{Term, style};

rust_i18n::i18n!("locales", fallback = "en-US");

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style(rust_i18n::t!("common.press_enter")).dim());
    term.read_line()?;
    Ok(())
}
