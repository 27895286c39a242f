//! 功能元件模組
//!
//! 每個子模組實現一個獨立的使用者流程，包含主要邏輯和專用工具

pub mod library_browser;
pub mod video_importer;

pub use library_browser::LibraryBrowser;
pub use video_importer::VideoImporter;
