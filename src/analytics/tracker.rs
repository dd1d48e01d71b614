use std::collections::VecDeque;

use super::AnalyticsSnapshot;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// 单个别名的访问记录
///
/// 不变量：`recent.len() <= capacity`，且 `count >= recent.len()`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTracker {
    count: u64,
    recent: VecDeque<i64>,
    capacity: usize,
}

impl Default for AccessTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl AccessTracker {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            count: 0,
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 记录一次访问，缓冲区已满时淘汰最旧的时间戳
    pub fn record(&mut self, at: i64) {
        self.count = self.count.saturating_add(1);
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(at);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn recent(&self) -> impl Iterator<Item = i64> + '_ {
        self.recent.iter().copied()
    }

    pub fn last_access(&self) -> Option<i64> {
        self.recent.back().copied()
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            access_count: self.count,
            recent_accesses: self.recent.iter().copied().collect(),
        }
    }
}
