//! 过期索引
//!
//! 以绝对过期时间（秒）为键的桶：同一秒过期的别名落在同一个桶里。
//! `pop_due(now)` 一次性取出所有 `<= now` 的桶，空桶会被立即删除。

use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct ExpirationIndex {
    buckets: BTreeMap<i64, HashSet<String>>,
    len: usize,
}

impl ExpirationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 `at` 时刻调度 `alias`，重复调度同一对 (alias, at) 不产生重复条目
    pub fn schedule(&mut self, alias: &str, at: i64) {
        if self.buckets.entry(at).or_default().insert(alias.to_string()) {
            self.len += 1;
        }
    }

    /// 取消 `at` 时刻对 `alias` 的调度，返回是否确实存在该条目
    pub fn unschedule(&mut self, alias: &str, at: i64) -> bool {
        let Some(bucket) = self.buckets.get_mut(&at) else {
            return false;
        };

        let removed = bucket.remove(alias);
        if bucket.is_empty() {
            self.buckets.remove(&at);
        }
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// 取出所有到期（`<= now`）的别名，顺序不保证
    pub fn pop_due(&mut self, now: i64) -> Vec<String> {
        let mut due = Vec::new();
        while let Some(entry) = self.buckets.first_entry() {
            if *entry.key() > now {
                break;
            }
            let bucket = entry.remove();
            self.len -= bucket.len();
            due.extend(bucket);
        }
        due
    }

    pub fn contains(&self, alias: &str, at: i64) -> bool {
        self.buckets
            .get(&at)
            .is_some_and(|bucket| bucket.contains(alias))
    }

    /// 最早的过期时间
    pub fn next_due(&self) -> Option<i64> {
        self.buckets.keys().next().copied()
    }

    /// 已调度条目总数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (i64, &str)> {
        self.buckets
            .iter()
            .flat_map(|(at, bucket)| bucket.iter().map(move |alias| (*at, alias.as_str())))
    }
}
