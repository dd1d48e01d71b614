//! 随机别名生成
//!
//! 生成器本身不接触存储：调用方传入 `is_taken` 判定候选是否已被占用。
//! `AliasRegistry` 在持锁状态下调用 `generate_unique`，因此返回的别名在插入时一定空闲。

use tracing::{trace, warn};

use super::{MAX_ALIAS_LENGTH, generate_random_code};
use crate::errors::{Result, TtlinkerError};

pub const DEFAULT_ALIAS_LENGTH: usize = 6;
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasGenerator {
    length: usize,
    max_attempts: usize,
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }
}

impl AliasGenerator {
    /// `length` 和 `max_attempts` 至少为 1
    pub fn new(length: usize, max_attempts: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_ALIAS_LENGTH),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// 生成一个候选别名（不检查冲突）
    pub fn generate(&self) -> String {
        generate_random_code(self.length)
    }

    /// 生成一个未被占用的别名
    ///
    /// 超过 `max_attempts` 次仍然冲突时返回 `CapacityExhausted`。
    pub fn generate_unique<F>(&self, mut is_taken: F) -> Result<String>
    where
        F: FnMut(&str) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generate();
            if !is_taken(&candidate) {
                trace!("Generated alias {} after {} attempt(s)", candidate, attempt);
                return Ok(candidate);
            }
        }

        warn!(
            "Alias generation gave up after {} attempts (length {})",
            self.max_attempts, self.length
        );
        Err(TtlinkerError::capacity_exhausted(format!(
            "no free alias of length {} found after {} attempts",
            self.length, self.max_attempts
        )))
    }
}

/// 校验用户指定的别名：1..=64 个 `[A-Za-z0-9_-]` 字符
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LENGTH
        && alias
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
