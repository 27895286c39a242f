use anyhow::{Result, bail};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// 檔案存在性與大小檢查結果
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub exists: bool,
    pub size: u64,
}

/// 檢查檔案是否存在及其大小；任何錯誤都視為不存在
#[must_use]
pub fn stat_file(path: &Path) -> FileStat {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => FileStat {
            exists: true,
            size: meta.len(),
        },
        _ => FileStat {
            exists: false,
            size: 0,
        },
    }
}

/// 盡力而為的檔案刪除：失敗只記錄日誌，絕不往上傳遞
/// （檔案可能已被系統清理或外部移除）
pub fn remove_file_best_effort(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("無法刪除檔案 {}: {e}", path.display());
    }
}

/// 去除 `file://` 前綴
///
/// 行動裝置的挑選器會回傳 file URI，外部轉檔器與檔案系統
/// 只接受純路徑；每次跨入這些邊界前都要套用
#[must_use]
pub fn strip_file_scheme(uri: &str) -> &str {
    uri.strip_prefix("file://").unwrap_or(uri)
}

/// 將記錄中的 uri 字串轉為檔案路徑
#[must_use]
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(strip_file_scheme(uri))
}

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_file_missing() {
        let stat = stat_file(Path::new("/nonexistent/video.mp4"));
        assert!(!stat.exists);
        assert_eq!(stat.size, 0);
    }

    #[test]
    fn test_stat_file_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp4");
        fs::write(&path, b"12345").unwrap();

        let stat = stat_file(&path);
        assert!(stat.exists);
        assert_eq!(stat.size, 5);
    }

    #[test]
    fn test_remove_file_best_effort_missing_is_silent() {
        // 不存在的檔案不應 panic 或回傳錯誤
        remove_file_best_effort(Path::new("/nonexistent/video.mp4"));
    }

    #[test]
    fn test_strip_file_scheme() {
        assert_eq!(strip_file_scheme("file:///data/a.mp4"), "/data/a.mp4");
        assert_eq!(strip_file_scheme("/data/a.mp4"), "/data/a.mp4");
        assert_eq!(uri_to_path("file:///data/a.mp4"), PathBuf::from("/data/a.mp4"));
    }
}
