//! 后台过期清理任务
//!
//! 按固定间隔唤醒，回收所有到期的别名。间隔越小 TTL 精度越高，唤醒次数也越多。
//! 通过 `SweeperHandle::shutdown` 协作式停止。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use super::registry::AliasRegistry;

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

pub struct Sweeper {
    registry: Arc<AliasRegistry>,
    interval: Duration,
}

impl Sweeper {
    pub fn new(registry: Arc<AliasRegistry>, interval: Duration) -> Self {
        Self {
            registry,
            // tokio::time::interval 不接受零间隔
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// 执行一次清理，返回回收数量
    pub fn sweep_once(&self) -> usize {
        let now = self.registry.now();
        let removed = self.registry.sweep_expired(now);
        if !removed.is_empty() {
            debug!(
                "Sweeper: reclaimed {} expired alias(es) at {}",
                removed.len(),
                now
            );
            trace!("Sweeper: reclaimed {:?}", removed);
        }
        removed.len()
    }

    /// 在当前 tokio 运行时中启动后台任务
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SweeperHandle { shutdown_tx, task }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Sweeper started with interval {:?}", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                changed = shutdown.changed() => {
                    // 发送端被丢弃同样视为停止信号
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Sweeper stopped");
    }
}

/// 后台清理任务句柄
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// 发送停止信号并等待任务退出
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("Sweeper task ended abnormally: {}", e);
        }
    }
}
