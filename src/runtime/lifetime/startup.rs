use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::LinkService;
use crate::storage::{AliasRegistry, Sweeper, SweeperHandle, SystemClock};

pub struct StartupContext {
    pub registry: Arc<AliasRegistry>,
    pub link_service: Arc<LinkService>,
    pub sweeper: SweeperHandle,
}

/// 准备服务器启动的上下文：构建注册表、链接服务，并启动后台过期清理任务
///
/// 必须在 tokio 运行时内调用。
pub fn prepare_server_startup(config: &StaticConfig) -> StartupContext {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let registry = Arc::new(AliasRegistry::from_config(
        &config.links,
        Arc::new(SystemClock),
    ));
    let link_service = Arc::new(LinkService::from_config(registry.clone(), &config.links));
    info!(
        "Alias registry ready (alias length {}, default TTL {}s, history capacity {})",
        config.links.alias_length, config.links.default_ttl, config.links.history_capacity
    );

    let sweeper = Sweeper::new(
        registry.clone(),
        Duration::from_millis(config.sweeper.interval_ms),
    )
    .spawn();

    debug!("Pre-startup finished in {:?}", start_time.elapsed());

    StartupContext {
        registry,
        link_service,
        sweeper,
    }
}
