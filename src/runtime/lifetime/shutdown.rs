use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::SweeperHandle;

/// 单个关闭任务超时时间（秒）
const TASK_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C 信号
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// 执行关闭任务：停止后台过期清理
pub async fn perform_shutdown_tasks(sweeper: SweeperHandle) {
    match timeout(Duration::from_secs(TASK_TIMEOUT_SECS), sweeper.shutdown()).await {
        Ok(()) => {
            info!("Sweeper stopped successfully");
        }
        Err(_) => {
            error!(
                "Sweeper shutdown timed out after {} seconds",
                TASK_TIMEOUT_SECS
            );
        }
    }
}
