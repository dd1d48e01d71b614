//! 短链接管理接口：创建、统计、更新、删除

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{info, trace};

use super::helpers::{error_from_ttlinker, json_response, message_response};
use super::types::{AnalyticsResponse, ShortenRequest, ShortenResponse, UpdateRequest};
use crate::services::{CreateLinkRequest, LinkService, UpdateLinkRequest};

pub struct LinkApi;

impl LinkApi {
    /// POST /shorten
    pub async fn shorten(
        body: web::Json<ShortenRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let body = body.into_inner();
        trace!("Shorten request: {:?}", body);

        let req = CreateLinkRequest {
            target: body.url.unwrap_or_default(),
            alias: body.alias,
            ttl: body.ttl,
        };

        match service.create_link(req) {
            Ok(result) => {
                info!(
                    "Shortened {} -> {} (generated: {})",
                    result.link.target, result.short_url, result.generated_alias
                );
                json_response(
                    StatusCode::CREATED,
                    &ShortenResponse {
                        shortened_url: result.short_url,
                        alias: result.link.alias,
                        expires_at: result.link.expires_at,
                    },
                )
            }
            Err(e) => error_from_ttlinker(&e),
        }
    }

    /// GET /analytics/{alias}
    pub async fn analytics(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        match service.analytics(&path) {
            Ok(snapshot) => json_response(
                StatusCode::OK,
                &AnalyticsResponse {
                    access_count: snapshot.access_count,
                    last_10_access_times: snapshot.recent_accesses,
                },
            ),
            Err(e) => error_from_ttlinker(&e),
        }
    }

    /// PUT /update/{alias}
    pub async fn update(
        path: web::Path<String>,
        body: web::Json<UpdateRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let body = body.into_inner();
        let req = UpdateLinkRequest {
            new_alias: body.new_alias,
            new_ttl: body.new_ttl,
        };

        match service.update_link(&path, req) {
            Ok(_) => message_response("Update successful"),
            Err(e) => error_from_ttlinker(&e),
        }
    }

    /// DELETE /delete/{alias}
    pub async fn delete(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        match service.delete_link(&path) {
            Ok(()) => message_response("Delete successful"),
            Err(e) => error_from_ttlinker(&e),
        }
    }
}

/// 短链接管理路由
pub fn link_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/shorten", web::post().to(LinkApi::shorten))
        .route("/analytics/{alias}", web::get().to(LinkApi::analytics))
        .route("/update/{alias}", web::put().to(LinkApi::update))
        .route("/delete/{alias}", web::delete().to(LinkApi::delete));
}
