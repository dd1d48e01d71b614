use serde::Serialize;

use crate::analytics::AccessTracker;

/// 注册表中的一条别名记录
#[derive(Debug, Clone)]
pub struct AliasRecord {
    pub alias: String,
    pub target: String,
    pub ttl_seconds: u64,
    pub created_at: i64,
    /// 当前调度键：过期索引中该别名所在桶的时间戳
    pub expires_at: i64,
    pub access: AccessTracker,
}

impl AliasRecord {
    #[inline]
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    pub fn view(&self) -> AliasRecordView {
        AliasRecordView {
            alias: self.alias.clone(),
            target: self.target.clone(),
            ttl_seconds: self.ttl_seconds,
            created_at: self.created_at,
            expires_at: self.expires_at,
            access_count: self.access.count(),
        }
    }
}

/// 对外暴露的只读快照（不包含访问历史）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasRecordView {
    pub alias: String,
    pub target: String,
    pub ttl_seconds: u64,
    pub created_at: i64,
    pub expires_at: i64,
    pub access_count: u64,
}
