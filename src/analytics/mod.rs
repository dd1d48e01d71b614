//! 访问统计
//!
//! 每个别名持有一个 `AccessTracker`：累计访问次数不设上限，
//! 最近访问时间只保留固定数量（环形缓冲区）。

pub mod tracker;

pub use tracker::{AccessTracker, DEFAULT_HISTORY_CAPACITY};

use serde::Serialize;

/// 某个别名的访问统计快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    /// 累计访问次数
    pub access_count: u64,
    /// 最近的访问时间（Unix 秒），按时间先后排列
    pub recent_accesses: Vec<i64>,
}
