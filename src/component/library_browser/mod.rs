//! 影片庫瀏覽
//!
//! 列表、統計、檢視詳情（含播放前檔案檢查）、編輯與刪除

mod main;
mod stats;

pub use main::LibraryBrowser;
pub use stats::LibraryStats;
