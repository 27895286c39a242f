//! 影片庫持久化儲存
//!
//! 記憶體內的集合是唯一事實來源，每次變更同步重寫完整快照，
//! 並在快照寫入成功後才回傳（與行動版 fire-and-forget 不同，
//! 程序崩潰不會遺失已回傳的變更）。除本模組外，任何元件都
//! 不允許直接寫入快照檔

use crate::error::JournalError;
use crate::library::record::{VideoMetadata, VideoRecord};
use crate::tools::{remove_file_best_effort, uri_to_path};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub struct VideoLibraryStore {
    snapshot_path: PathBuf,
    records: Vec<VideoRecord>,
}

impl VideoLibraryStore {
    /// 載入快照；檔案不存在視為空集合
    ///
    /// 快照損毀不讓整個程式失敗：把壞檔改名備份、記錄警告、
    /// 從空集合重新開始
    pub fn load(snapshot_path: &Path) -> Result<Self, JournalError> {
        let records = match Self::read_snapshot(snapshot_path) {
            Ok(records) => records,
            Err(JournalError::CorruptSnapshot { path, source }) => {
                warn!("影片庫快照損毀（{source}），重設為空集合: {}", path.display());
                let backup = path.with_extension("json.corrupt");
                if let Err(e) = fs::rename(&path, &backup) {
                    warn!("無法備份損毀的快照: {e}");
                }
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            snapshot_path: snapshot_path.to_path_buf(),
            records,
        })
    }

    fn read_snapshot(path: &Path) -> Result<Vec<VideoRecord>, JournalError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| JournalError::CorruptSnapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 插入順序即預設顯示順序
    #[must_use]
    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&VideoRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 新增記錄到集合尾端
    ///
    /// 不檢查重複 id：id 由 UUID 產生，呼叫端保證唯一
    pub fn add(&mut self, record: VideoRecord) -> Result<(), JournalError> {
        info!("新增影片記錄: {} ({})", record.title, record.id);
        self.records.push(record);
        self.persist()
    }

    /// 合併標題／描述到指定記錄；id 不存在時為 no-op
    ///
    /// 回傳是否有記錄被更新
    pub fn update(&mut self, id: &str, metadata: &VideoMetadata) -> Result<bool, JournalError> {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            return Ok(false);
        };

        if let Some(title) = &metadata.title {
            record.title = title.clone();
        }
        if let Some(description) = &metadata.description {
            record.description = description.clone();
        }

        self.persist()?;
        Ok(true)
    }

    /// 刪除記錄並盡力刪除其影片檔；id 不存在時為 no-op
    ///
    /// 影片檔可能已被外部清掉，刪檔失敗只記錄日誌
    pub fn delete(&mut self, id: &str) -> Result<bool, JournalError> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };

        let record = self.records.remove(index);
        remove_file_best_effort(&uri_to_path(&record.uri));

        self.persist()?;
        Ok(true)
    }

    /// 清空整個影片庫，盡力刪除每筆記錄的影片檔
    pub fn delete_all(&mut self) -> Result<(), JournalError> {
        for record in &self.records {
            remove_file_best_effort(&uri_to_path(&record.uri));
        }
        self.records.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), JournalError> {
        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.snapshot_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_in_temp_dir() -> (PathBuf, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (dir.path().join("videos.json"), dir)
    }

    fn sample_record(title: &str, uri: &str) -> VideoRecord {
        VideoRecord::new(title.to_string(), String::new(), uri.to_string(), 12.0, None)
    }

    #[test]
    fn test_load_missing_snapshot_is_empty() {
        let (path, _dir) = snapshot_in_temp_dir();
        let store = VideoLibraryStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let (path, _dir) = snapshot_in_temp_dir();

        let mut store = VideoLibraryStore::load(&path).unwrap();
        store.add(sample_record("Trip", "/f/a.mp4")).unwrap();
        store.add(sample_record("Dinner", "/f/b.mp4")).unwrap();

        let reloaded = VideoLibraryStore::load(&path).unwrap();
        assert_eq!(reloaded.records(), store.records());
        // 插入順序保留
        assert_eq!(reloaded.records()[0].title, "Trip");
        assert_eq!(reloaded.records()[1].title, "Dinner");
    }

    #[test]
    fn test_update_merges_metadata_only() {
        let (path, _dir) = snapshot_in_temp_dir();
        let mut store = VideoLibraryStore::load(&path).unwrap();

        let record = sample_record("Trip", "/f/a.mp4");
        let id = record.id.clone();
        let created_at = record.created_at;
        store.add(record).unwrap();

        let updated = store
            .update(
                &id,
                &VideoMetadata {
                    title: Some("Trip 2025".to_string()),
                    description: None,
                },
            )
            .unwrap();
        assert!(updated);

        let record = store.find(&id).unwrap();
        assert_eq!(record.title, "Trip 2025");
        assert_eq!(record.uri, "/f/a.mp4");
        assert!((record.duration - 12.0).abs() < f64::EPSILON);
        assert_eq!(record.created_at, created_at);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (path, _dir) = snapshot_in_temp_dir();
        let mut store = VideoLibraryStore::load(&path).unwrap();
        store.add(sample_record("Trip", "/f/a.mp4")).unwrap();

        let updated = store
            .update(
                "missing",
                &VideoMetadata {
                    title: Some("X".to_string()),
                    description: None,
                },
            )
            .unwrap();

        assert!(!updated);
        assert_eq!(store.records()[0].title, "Trip");
    }

    #[test]
    fn test_delete_removes_record_and_backing_file() {
        let (path, dir) = snapshot_in_temp_dir();
        let video_file = dir.path().join("a.mp4");
        fs::write(&video_file, b"video-bytes").unwrap();

        let mut store = VideoLibraryStore::load(&path).unwrap();
        let record = sample_record("Trip", &video_file.to_string_lossy());
        let id = record.id.clone();
        store.add(record).unwrap();

        assert!(store.delete(&id).unwrap());
        assert!(store.is_empty());
        assert!(!video_file.exists(), "刪除記錄應嘗試刪除影片檔");

        let reloaded = VideoLibraryStore::load(&path).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (path, _dir) = snapshot_in_temp_dir();
        let mut store = VideoLibraryStore::load(&path).unwrap();
        store.add(sample_record("Trip", "/f/a.mp4")).unwrap();

        assert!(!store.delete("missing").unwrap());
        assert_eq!(store.len(), 1);

        // 影片檔不存在也不影響刪除
        let id = store.records()[0].id.clone();
        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
    }

    #[test]
    fn test_delete_all_clears_and_removes_files() {
        let (path, dir) = snapshot_in_temp_dir();
        let file_a = dir.path().join("a.mp4");
        let file_b = dir.path().join("b.mp4");
        fs::write(&file_a, b"a").unwrap();
        fs::write(&file_b, b"b").unwrap();

        let mut store = VideoLibraryStore::load(&path).unwrap();
        store
            .add(sample_record("A", &file_a.to_string_lossy()))
            .unwrap();
        store
            .add(sample_record("B", &file_b.to_string_lossy()))
            .unwrap();

        store.delete_all().unwrap();

        assert!(store.is_empty());
        assert!(!file_a.exists());
        assert!(!file_b.exists());
        assert!(VideoLibraryStore::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_resets_with_backup() {
        let (path, _dir) = snapshot_in_temp_dir();
        fs::write(&path, "{not valid json]").unwrap();

        let store = VideoLibraryStore::load(&path).unwrap();
        assert!(store.is_empty());

        // 壞檔已備份，原位置讓出給新的快照
        assert!(path.with_extension("json.corrupt").exists());
        assert!(!path.exists());
    }
}
