use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{error, trace};

use super::helpers::json_response;
use super::types::HealthResponse;
use crate::services::LinkService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    /// GET /health
    ///
    /// 记录数与调度条目数不一致时返回 503。只做一次 O(1) 的计数读取。
    pub async fn health_check(
        service: web::Data<Arc<LinkService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> HttpResponse {
        trace!("Received health check request");

        let stats = service.registry().stats();
        let index_consistent = stats.counts_match();
        if !index_consistent {
            error!(
                "Expiration index is out of sync with the alias registry ({} records, {} scheduled)",
                stats.stored, stats.scheduled
            );
        }

        let now = chrono::Utc::now();
        let body = HealthResponse {
            status: if index_consistent { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: now.to_rfc3339(),
            uptime: (now - app_start_time.start_datetime).num_seconds().max(0) as u64,
            stored_aliases: stats.stored,
            scheduled_expirations: stats.scheduled,
            index_consistent,
        };

        let status = if index_consistent {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        json_response(status, &body)
    }
}

pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(HealthService::health_check));
}
