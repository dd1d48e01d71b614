//! 别名注册表
//!
//! 别名 → 记录的权威映射与过期索引放在同一把互斥锁后面，
//! create / update / delete / sweep 都在一个临界区内同时修改两者，
//! 其他操作不会观察到"已注册但未调度"之类的中间状态。
//!
//! 逻辑上已过期（`expires_at <= now`）但尚未被 Sweeper 回收的记录对外等同于不存在，
//! 任何操作碰到它都会顺手清理掉。

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use super::clock::{Clock, SystemClock};
use super::expiration::ExpirationIndex;
use super::record::{AliasRecord, AliasRecordView};
use crate::analytics::{AccessTracker, AnalyticsSnapshot, DEFAULT_HISTORY_CAPACITY};
use crate::config::LinksConfig;
use crate::errors::{Result, TtlinkerError};
use crate::utils::{AliasGenerator, is_reserved_alias, is_valid_alias};

#[derive(Debug, Default)]
struct RegistryState {
    records: HashMap<String, AliasRecord>,
    index: ExpirationIndex,
}

impl RegistryState {
    /// 插入记录并按其 `expires_at` 调度
    fn insert(&mut self, record: AliasRecord) {
        self.index.schedule(&record.alias, record.expires_at);
        self.records.insert(record.alias.clone(), record);
    }

    /// 移除记录并取消其调度条目
    fn remove(&mut self, alias: &str) -> Option<AliasRecord> {
        let record = self.records.remove(alias)?;
        self.index.unschedule(alias, record.expires_at);
        Some(record)
    }

    /// 若记录存在且已过期则清理，返回是否发生了清理
    fn purge_if_expired(&mut self, alias: &str, now: i64) -> bool {
        if self.records.get(alias).is_some_and(|r| r.is_expired(now)) {
            self.remove(alias);
            debug!("Purged expired alias on access: {}", alias);
            true
        } else {
            false
        }
    }

    fn live_mut(&mut self, alias: &str, now: i64) -> Option<&mut AliasRecord> {
        self.purge_if_expired(alias, now);
        self.records.get_mut(alias)
    }

    fn is_taken(&self, alias: &str) -> bool {
        self.records.contains_key(alias)
    }
}

/// 注册表计数快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// 记录数（包括已过期但尚未回收的记录）
    pub stored: usize,
    /// 过期索引中的条目数
    pub scheduled: usize,
}

impl RegistryStats {
    /// 每条记录恰好一个调度条目时两者相等
    pub fn counts_match(&self) -> bool {
        self.stored == self.scheduled
    }
}

pub struct AliasRegistry {
    state: Mutex<RegistryState>,
    generator: AliasGenerator,
    history_capacity: usize,
    clock: Arc<dyn Clock>,
}

impl Default for AliasRegistry {
    fn default() -> Self {
        Self::new(
            AliasGenerator::default(),
            DEFAULT_HISTORY_CAPACITY,
            Arc::new(SystemClock),
        )
    }
}

impl AliasRegistry {
    pub fn new(generator: AliasGenerator, history_capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            generator,
            history_capacity,
            clock,
        }
    }

    pub fn from_config(config: &LinksConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            AliasGenerator::new(config.alias_length, config.max_generate_attempts),
            config.history_capacity,
            clock,
        )
    }

    /// 当前时间（来自注册表的时钟）
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// 创建别名
    ///
    /// 指定别名时若其仍然有效则返回 `AliasInUse`；未指定时随机生成。
    pub fn create(
        &self,
        target: &str,
        ttl_seconds: u64,
        requested_alias: Option<&str>,
    ) -> Result<AliasRecordView> {
        if target.trim().is_empty() {
            return Err(TtlinkerError::invalid_input("URL is required"));
        }
        // 控制字符无法写入 Location 头
        if target.chars().any(|c| c.is_ascii_control()) {
            return Err(TtlinkerError::invalid_input(
                "URL must not contain control characters",
            ));
        }
        if let Some(alias) = requested_alias
            && !is_valid_alias(alias)
        {
            return Err(TtlinkerError::invalid_input(format!(
                "Invalid alias '{}': use 1-64 characters of [A-Za-z0-9_-]",
                alias
            )));
        }

        let now = self.clock.now();
        let expires_at = expiry_time(now, ttl_seconds)?;

        let mut state = self.state.lock();
        let alias = match requested_alias {
            Some(alias) => {
                state.purge_if_expired(alias, now);
                if state.is_taken(alias) {
                    return Err(TtlinkerError::alias_in_use(format!(
                        "Alias '{}' is already in use",
                        alias
                    )));
                }
                alias.to_string()
            }
            None => self
                .generator
                .generate_unique(|c| state.is_taken(c) || is_reserved_alias(c))?,
        };

        let record = AliasRecord {
            alias: alias.clone(),
            target: target.to_string(),
            ttl_seconds,
            created_at: now,
            expires_at,
            access: AccessTracker::new(self.history_capacity),
        };
        let view = record.view();
        state.insert(record);
        drop(state);

        info!(
            "Created alias {} -> {} (expires at {})",
            alias, target, expires_at
        );
        Ok(view)
    }

    /// 解析别名，返回目标地址并记录一次访问
    pub fn resolve(&self, alias: &str) -> Result<String> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        match state.live_mut(alias, now) {
            Some(record) => {
                record.access.record(now);
                trace!(
                    "Resolved alias {} (access #{})",
                    alias,
                    record.access.count()
                );
                Ok(record.target.clone())
            }
            None => Err(not_found(alias)),
        }
    }

    /// 读取访问统计（不计入访问次数）
    pub fn analytics(&self, alias: &str) -> Result<AnalyticsSnapshot> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state
            .live_mut(alias, now)
            .map(|record| record.access.snapshot())
            .ok_or_else(|| not_found(alias))
    }

    /// 重命名别名和/或重设 TTL
    ///
    /// 旧调度条目在同一临界区内被移除，新条目按最终的别名和 `expires_at` 重新调度。
    /// 任一校验失败时不做任何修改。
    pub fn update(
        &self,
        alias: &str,
        new_alias: Option<&str>,
        new_ttl_seconds: Option<u64>,
    ) -> Result<AliasRecordView> {
        if let Some(name) = new_alias
            && !is_valid_alias(name)
        {
            return Err(TtlinkerError::invalid_input(format!(
                "Invalid alias '{}': use 1-64 characters of [A-Za-z0-9_-]",
                name
            )));
        }

        let now = self.clock.now();
        let new_expiry = new_ttl_seconds
            .map(|ttl| expiry_time(now, ttl).map(|at| (ttl, at)))
            .transpose()?;

        let mut state = self.state.lock();
        if state.live_mut(alias, now).is_none() {
            return Err(not_found(alias));
        }

        let final_alias = new_alias.unwrap_or(alias);
        if final_alias != alias {
            state.purge_if_expired(final_alias, now);
            if state.is_taken(final_alias) {
                return Err(TtlinkerError::alias_in_use(format!(
                    "New alias '{}' is already in use",
                    final_alias
                )));
            }
        }

        let Some(mut record) = state.remove(alias) else {
            return Err(not_found(alias));
        };
        let old_expires_at = record.expires_at;
        record.alias = final_alias.to_string();
        if let Some((ttl, expires_at)) = new_expiry {
            record.ttl_seconds = ttl;
            record.expires_at = expires_at;
        }
        let view = record.view();
        state.insert(record);
        drop(state);

        info!(
            "Updated alias {} -> {} (expires at {} -> {})",
            alias, view.alias, old_expires_at, view.expires_at
        );
        Ok(view)
    }

    /// 删除别名及其调度条目
    pub fn delete(&self, alias: &str) -> Result<()> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        if state.purge_if_expired(alias, now) {
            return Err(not_found(alias));
        }
        match state.remove(alias) {
            Some(_) => {
                drop(state);
                info!("Deleted alias {}", alias);
                Ok(())
            }
            None => Err(not_found(alias)),
        }
    }

    /// 回收所有 `expires_at <= now` 的别名，返回被移除的别名
    ///
    /// 已被删除或重命名的别名直接忽略。
    pub fn sweep_expired(&self, now: i64) -> Vec<String> {
        let mut state = self.state.lock();
        let due = state.index.pop_due(now);
        let mut removed = Vec::with_capacity(due.len());
        for alias in due {
            if state.records.get(&alias).is_some_and(|r| r.is_expired(now)) {
                state.records.remove(&alias);
                removed.push(alias);
            } else {
                trace!("Sweeper skipped alias {}: no longer scheduled here", alias);
            }
        }
        removed
    }

    /// 只读快照，不记录访问
    pub fn get(&self, alias: &str) -> Option<AliasRecordView> {
        let now = self.clock.now();
        let state = self.state.lock();
        state
            .records
            .get(alias)
            .filter(|r| !r.is_expired(now))
            .map(AliasRecord::view)
    }

    /// 注册表中的记录数（包括已过期但尚未回收的记录）
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// 过期索引中的条目数
    pub fn scheduled_len(&self) -> usize {
        self.state.lock().index.len()
    }

    /// 一次加锁读取记录数与调度条目数，O(1)，供健康检查使用
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();
        RegistryStats {
            stored: state.records.len(),
            scheduled: state.index.len(),
        }
    }

    /// 校验每条记录恰好对应一个调度条目，且条目键等于记录的 `expires_at`
    ///
    /// 持锁遍历全部条目（O(n)），只用于测试和排障，不要放在请求路径上。
    pub fn check_consistency(&self) -> bool {
        let state = self.state.lock();
        let mut matched = 0;
        for (at, alias) in state.index.entries() {
            match state.records.get(alias) {
                Some(record) if record.expires_at == at => matched += 1,
                _ => return false,
            }
        }
        matched == state.records.len() && state.index.len() == matched
    }
}

fn expiry_time(now: i64, ttl_seconds: u64) -> Result<i64> {
    if ttl_seconds == 0 {
        return Err(TtlinkerError::invalid_input("TTL must be at least 1 second"));
    }
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| TtlinkerError::invalid_input(format!("TTL {} is too large", ttl_seconds)))
}

fn not_found(alias: &str) -> TtlinkerError {
    TtlinkerError::not_found(format!("Alias '{}' not found", alias))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::clock::ManualClock;

    fn registry_at(start: i64) -> (AliasRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        let registry = AliasRegistry::new(
            AliasGenerator::default(),
            DEFAULT_HISTORY_CAPACITY,
            clock.clone(),
        );
        (registry, clock)
    }

    #[test]
    fn test_create_schedules_at_expiry() {
        let (registry, _clock) = registry_at(1_000);
        let view = registry
            .create("http://example.com", 5, Some("abc"))
            .unwrap();

        assert_eq!(view.created_at, 1_000);
        assert_eq!(view.expires_at, 1_005);
        assert_eq!(registry.scheduled_len(), 1);
        assert!(registry.state.lock().index.contains("abc", 1_005));
        assert!(registry.check_consistency());
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (registry, _clock) = registry_at(0);

        let err = registry.create("  ", 10, None).unwrap_err();
        assert!(matches!(err, TtlinkerError::InvalidInput(_)));

        let err = registry.create("http://x", 0, None).unwrap_err();
        assert!(matches!(err, TtlinkerError::InvalidInput(_)));

        let err = registry.create("http://x", u64::MAX, None).unwrap_err();
        assert!(matches!(err, TtlinkerError::InvalidInput(_)));

        let err = registry.create("http://x", 10, Some("bad alias")).unwrap_err();
        assert!(matches!(err, TtlinkerError::InvalidInput(_)));

        assert!(registry.is_empty());
        assert_eq!(registry.scheduled_len(), 0);
    }

    #[test]
    fn test_update_ttl_replaces_schedule_entry() {
        let (registry, clock) = registry_at(100);
        registry.create("http://example.com", 10, Some("abc")).unwrap();

        clock.advance(3);
        let view = registry.update("abc", None, Some(60)).unwrap();

        assert_eq!(view.expires_at, 163);
        assert_eq!(view.ttl_seconds, 60);
        assert_eq!(view.created_at, 100);
        let state = registry.state.lock();
        assert!(!state.index.contains("abc", 110));
        assert!(state.index.contains("abc", 163));
        assert_eq!(state.index.len(), 1);
    }

    #[test]
    fn test_sweep_skips_renamed_alias() {
        let (registry, _clock) = registry_at(0);
        registry.create("http://a", 5, Some("old")).unwrap();
        registry.update("old", Some("new"), None).unwrap();

        // 别名 "old" 在 t=5 的条目已随重命名移除，只有 "new" 会被回收
        let removed = registry.sweep_expired(5);
        assert_eq!(removed, vec!["new".to_string()]);
        assert!(registry.is_empty());
        assert!(registry.check_consistency());
    }

    #[test]
    fn test_stats_counts_records_and_schedule() {
        let (registry, clock) = registry_at(0);
        assert_eq!(
            registry.stats(),
            RegistryStats {
                stored: 0,
                scheduled: 0
            }
        );

        registry.create("http://a", 5, Some("one")).unwrap();
        registry.create("http://b", 50, Some("two")).unwrap();
        registry.update("one", Some("uno"), Some(8)).unwrap();

        // 过期但未回收的记录仍计入 stored
        clock.advance(10);
        let stats = registry.stats();
        assert_eq!(stats.stored, 2);
        assert_eq!(stats.scheduled, 2);
        assert!(stats.counts_match());

        registry.sweep_expired(10);
        assert_eq!(registry.stats().stored, 1);
        assert!(registry.stats().counts_match());
    }

    #[test]
    fn test_create_rejects_control_characters_in_target() {
        let (registry, _clock) = registry_at(0);

        for target in [
            "http://a.com/\nx",
            "http://a.com/\r\nSet-Cookie: x",
            "http://a.com/\tx",
            "http://a.com/\u{7f}",
        ] {
            let err = registry.create(target, 10, Some("cc")).unwrap_err();
            assert!(
                matches!(err, TtlinkerError::InvalidInput(_)),
                "target: {:?}",
                target
            );
        }

        assert!(registry.is_empty());
        assert_eq!(registry.scheduled_len(), 0);
        assert!(matches!(
            registry.resolve("cc"),
            Err(TtlinkerError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_of_expired_alias_is_not_found() {
        let (registry, clock) = registry_at(0);
        registry.create("http://a", 5, Some("gone")).unwrap();

        clock.advance(5);
        let err = registry.delete("gone").unwrap_err();
        assert!(matches!(err, TtlinkerError::NotFound(_)));
        assert!(registry.is_empty());
        assert_eq!(registry.scheduled_len(), 0);
    }
}
