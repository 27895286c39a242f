//! 影片匯入流程
//!
//! 挑選 → 容器正規化 → 選擇剪輯範圍 → 剪輯（含備用策略）→
//! 探測長度 → 產生縮圖 → 填寫標題描述 → 寫入影片庫

mod main;
mod metadata_form;
mod picker;

pub use main::VideoImporter;
pub use metadata_form::{
    DESCRIPTION_MAX_CHARS, TITLE_MIN_CHARS, VideoMetadataInput, prompt_metadata,
};
pub use picker::{PickOutcome, pick_video};
