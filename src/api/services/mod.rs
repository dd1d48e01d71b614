pub mod health;
pub mod helpers;
pub mod links;
pub mod redirect;
pub mod types;

pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::json_config;
pub use links::{LinkApi, link_routes};
pub use redirect::{RedirectService, redirect_routes};

/// 按匹配优先级注册全部路由：health → 管理接口 → 跳转
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(health_routes)
        .configure(link_routes)
        .configure(redirect_routes);
}
