//! 整合測試 - 不依賴外部轉檔器的完整流程驗證
//!
//! 影片庫持久化、統計與快照相容性

use std::fs;

use video_journal::component::library_browser::LibraryStats;
use video_journal::library::{VideoLibraryStore, VideoMetadata, VideoRecord};
use video_journal::tools::{format_duration, format_timestamp, stat_file, uri_to_path};

fn sample_record(title: &str, uri: &str, duration: f64) -> VideoRecord {
    VideoRecord::new(
        title.to_string(),
        String::new(),
        uri.to_string(),
        duration,
        None,
    )
}

/// 測試 1: 任意變更序列後重新載入，結果與記憶體內狀態一致
#[test]
fn test_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("videos.json");

    let mut store = VideoLibraryStore::load(&snapshot).unwrap();
    store.add(sample_record("Trip", "/f/a.mp4", 12.0)).unwrap();
    store.add(sample_record("Dinner", "/f/b.mp4", 33.5)).unwrap();
    store.add(sample_record("Hike", "/f/c.mp4", 8.0)).unwrap();

    let second_id = store.records()[1].id.clone();
    store
        .update(
            &second_id,
            &VideoMetadata {
                title: Some("Dinner 2025".to_string()),
                description: Some("Friday night".to_string()),
            },
        )
        .unwrap();

    let first_id = store.records()[0].id.clone();
    store.delete(&first_id).unwrap();

    let reloaded = VideoLibraryStore::load(&snapshot).unwrap();
    assert_eq!(reloaded.records(), store.records());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.records()[0].title, "Dinner 2025");
    assert_eq!(reloaded.records()[0].description, "Friday night");
    assert_eq!(reloaded.records()[1].title, "Hike");
}

/// 測試 2: 單筆記錄的完整生命週期 — 新增、更新、刪除
#[test]
fn test_add_update_delete_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("videos.json");
    let video_file = dir.path().join("a.mp4");
    fs::write(&video_file, b"video-bytes").unwrap();

    let mut store = VideoLibraryStore::load(&snapshot).unwrap();
    let record = sample_record("Trip", &video_file.to_string_lossy(), 12.0);
    let id = record.id.clone();
    let created_at = record.created_at;
    store.add(record).unwrap();

    // 更新只動標題，其餘欄位不變
    store
        .update(
            &id,
            &VideoMetadata {
                title: Some("Trip 2025".to_string()),
                description: None,
            },
        )
        .unwrap();

    let updated = store.find(&id).unwrap();
    assert_eq!(updated.title, "Trip 2025");
    assert_eq!(updated.uri, video_file.to_string_lossy());
    assert!((updated.duration - 12.0).abs() < f64::EPSILON);
    assert_eq!(updated.created_at, created_at);

    // 刪除後集合為空，且嘗試過刪除影片檔
    store.delete(&id).unwrap();
    assert!(store.is_empty());
    assert!(!video_file.exists());
}

/// 測試 3: 刪除不存在的 id 是 no-op
#[test]
fn test_delete_unknown_id_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("videos.json");

    let mut store = VideoLibraryStore::load(&snapshot).unwrap();
    store.add(sample_record("Trip", "/f/a.mp4", 12.0)).unwrap();

    assert!(!store.delete("no-such-id").unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].title, "Trip");
}

/// 測試 4: 快照欄位為 camelCase，與行動版既有資料相容
#[test]
fn test_snapshot_is_mobile_compatible() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("videos.json");

    let mut store = VideoLibraryStore::load(&snapshot).unwrap();
    store.add(sample_record("Trip", "/f/a.mp4", 12.0)).unwrap();

    let content = fs::read_to_string(&snapshot).unwrap();
    assert!(content.contains("\"createdAt\""));
    assert!(content.contains("\"trimmedUri\""));
    assert!(!content.contains("\"created_at\""));

    // 行動版寫出的最小欄位集也要能讀回
    fs::write(
        &snapshot,
        r#"[{"id":"m1","title":"Old","description":"","uri":"/f/old.mp4","duration":7,"createdAt":1700000000000}]"#,
    )
    .unwrap();
    let reloaded = VideoLibraryStore::load(&snapshot).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.records()[0].id, "m1");
}

/// 測試 5: 損毀的快照備份後重設為空，不讓程式失敗
#[test]
fn test_corrupt_snapshot_recovery() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("videos.json");
    fs::write(&snapshot, "[{\"id\": oops").unwrap();

    let mut store = VideoLibraryStore::load(&snapshot).unwrap();
    assert!(store.is_empty());
    assert!(snapshot.with_extension("json.corrupt").exists());

    // 重設後可正常寫入
    store.add(sample_record("Fresh", "/f/new.mp4", 3.0)).unwrap();
    assert_eq!(VideoLibraryStore::load(&snapshot).unwrap().len(), 1);
}

/// 測試 6: 統計與顯示格式
#[test]
fn test_stats_and_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let video_file = dir.path().join("a.mp4");
    fs::write(&video_file, vec![0u8; 2048]).unwrap();

    let records = vec![
        sample_record("A", &video_file.to_string_lossy(), 65.0),
        sample_record("B", "/nonexistent/b.mp4", 30.0),
    ];

    let stats = LibraryStats::collect(&records);
    assert_eq!(stats.clip_count, 2);
    assert!((stats.total_duration_seconds - 95.0).abs() < 0.001);
    assert_eq!(stats.total_size_bytes, 2048);

    assert_eq!(format_duration(stats.total_duration_seconds), "1:35");
    assert_eq!(format_timestamp(1_704_067_200_000), "2024-01-01 00:00");
}

/// 測試 7: file URI 正規化在每個邊界一致
#[test]
fn test_file_uri_normalization() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("videos.json");
    let video_file = dir.path().join("a.mp4");
    fs::write(&video_file, b"x").unwrap();

    let uri = format!("file://{}", video_file.display());
    assert!(stat_file(&uri_to_path(&uri)).exists);

    // 帶 file:// 前綴的記錄，刪除時也要找得到實際檔案
    let mut store = VideoLibraryStore::load(&snapshot).unwrap();
    let record = sample_record("Trip", &uri, 1.0);
    let id = record.id.clone();
    store.add(record).unwrap();
    store.delete(&id).unwrap();
    assert!(!video_file.exists());
}
