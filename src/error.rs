use std::path::PathBuf;
use thiserror::Error;

/// 核心工作流程的錯誤類型
///
/// 剪輯與持久化失敗需要讓呼叫端能分辨原因，
/// 其餘應用層錯誤一律走 `anyhow`
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("無效的剪輯範圍: start={start}, end={end}")]
    InvalidTrimRange { start: f64, end: f64 },

    /// 主要與備用剪輯策略皆失敗，`log` 保留外部程序的完整輸出供診斷
    #[error("影片剪輯失敗（主要與備用方法皆失敗）")]
    TrimFailed { log: String },

    #[error("影片庫快照損毀: {path}")]
    CorruptSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;
