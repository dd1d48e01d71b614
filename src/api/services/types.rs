//! HTTP 请求/响应类型

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ShortenRequest {
    pub url: Option<String>,
    pub alias: Option<String>,
    pub ttl: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenResponse {
    pub shortened_url: String,
    pub alias: String,
    pub expires_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateRequest {
    pub new_alias: Option<String>,
    pub new_ttl: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnalyticsResponse {
    pub access_count: u64,
    pub last_10_access_times: Vec<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    /// 存储中的记录数，已过期但尚未被回收的记录也计入
    pub stored_aliases: usize,
    pub scheduled_expirations: usize,
    pub index_consistent: bool,
}
