use crate::tools::now_epoch_ms;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 單支日誌影片的持久化記錄
///
/// 快照以 camelCase 欄位名序列化，與行動版既有資料相容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// 唯一識別碼，建立後不變，為唯一查詢鍵
    pub id: String,
    pub title: String,
    pub description: String,
    /// 剪輯完成的影片檔；記錄擁有此檔案的生命週期，
    /// 刪除記錄時盡力刪除它
    pub uri: String,
    /// 目前等同 `uri`；保留獨立欄位以便未來區分剪輯前後來源
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trimmed_uri: Option<String>,
    /// 影片長度（秒），建立時探測一次後不再變動，0 表示未知
    pub duration: f64,
    /// 建立時間（epoch 毫秒），用於顯示排序與格式化
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_uri: Option<String>,
}

impl VideoRecord {
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        uri: String,
        duration: f64,
        thumbnail_uri: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            trimmed_uri: Some(uri.clone()),
            uri,
            duration,
            created_at: now_epoch_ms(),
            thumbnail_uri,
        }
    }
}

/// 使用者可事後修改的欄位；`None` 表示維持原值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}
