use crate::library::VideoRecord;
use crate::tools::{stat_file, uri_to_path};

/// 影片庫統計摘要
#[derive(Debug, Default, PartialEq)]
pub struct LibraryStats {
    pub clip_count: usize,
    pub total_duration_seconds: f64,
    pub total_size_bytes: u64,
}

impl LibraryStats {
    /// 大小以當下檔案系統狀態為準，已遺失的檔案計為 0
    #[must_use]
    pub fn collect(records: &[VideoRecord]) -> Self {
        let mut stats = Self {
            clip_count: records.len(),
            ..Self::default()
        };

        for record in records {
            stats.total_duration_seconds += record.duration.max(0.0);
            stats.total_size_bytes += stat_file(&uri_to_path(&record.uri)).size;
        }

        stats
    }
}
