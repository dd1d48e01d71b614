//! 别名存储核心
//!
//! - `registry`: 别名注册表（记录 + 过期索引，单锁保护）
//! - `expiration`: 按过期秒分桶的过期索引
//! - `sweeper`: 后台过期回收任务
//! - `clock`: 时间源抽象

pub mod clock;
pub mod expiration;
pub mod record;
pub mod registry;
pub mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use expiration::ExpirationIndex;
pub use record::{AliasRecord, AliasRecordView};
pub use registry::{AliasRegistry, RegistryStats};
pub use sweeper::{DEFAULT_SWEEP_INTERVAL, Sweeper, SweeperHandle};
