//! 影片庫模組
//!
//! 記錄型別與其持久化儲存

pub mod record;
pub mod store;

pub use record::{VideoMetadata, VideoRecord};
pub use store::VideoLibraryStore;
