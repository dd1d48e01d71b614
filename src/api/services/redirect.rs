use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, trace};

use super::helpers::error_from_ttlinker;
use crate::services::LinkService;

pub const HOME_BANNER: &str = "URL Shortener API is running!";

pub struct RedirectService {}

impl RedirectService {
    /// GET /
    pub async fn home() -> impl Responder {
        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(HOME_BANNER)
    }

    /// GET /{alias}
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let alias = path.into_inner();

        match service.resolve(&alias) {
            Ok(target) => {
                trace!("Redirecting {} -> {}", alias, target);
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header(("Location", target))
                    .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .finish()
            }
            Err(e) => {
                debug!("Redirect failed for {}: {}", alias, e);
                error_from_ttlinker(&e)
            }
        }
    }
}

/// Redirect 路由配置（需最后注册，`/{alias}` 会匹配所有单段路径）
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(RedirectService::home))
        .route("/{alias}", web::get().to(RedirectService::handle_redirect));
}
