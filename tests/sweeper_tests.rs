//! Background sweeper tests
//!
//! Expiration must happen even when nobody touches the alias again, so these
//! tests check the registry's size rather than calling `resolve` (which would
//! purge lazily on its own).

use std::sync::Arc;
use std::time::Duration;

use ttlinker::errors::TtlinkerError;
use ttlinker::storage::{AliasRegistry, ManualClock, Sweeper};
use ttlinker::utils::AliasGenerator;

const START: i64 = 1_700_000_000;

fn manual_registry() -> (Arc<AliasRegistry>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START));
    let registry = Arc::new(AliasRegistry::new(
        AliasGenerator::default(),
        10,
        clock.clone(),
    ));
    (registry, clock)
}

/// 轮询直到条件成立或超时
async fn wait_until<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}

#[test]
fn test_sweep_once_reclaims_due_aliases() {
    let (registry, clock) = manual_registry();
    registry.create("http://a.com", 3, Some("soon")).unwrap();
    registry.create("http://b.com", 30, Some("later")).unwrap();

    let sweeper = Sweeper::new(registry.clone(), Duration::from_secs(1));
    assert_eq!(sweeper.sweep_once(), 0);

    clock.advance(3);
    assert_eq!(sweeper.sweep_once(), 1);
    assert_eq!(registry.len(), 1);
    assert!(registry.get("later").is_some());
    assert!(registry.check_consistency());
}

#[tokio::test]
async fn test_alias_with_one_second_ttl_is_swept_in_real_time() {
    let registry = Arc::new(AliasRegistry::default());
    let handle = Sweeper::new(registry.clone(), Duration::from_millis(50)).spawn();

    registry.create("http://example.com", 1, Some("blink")).unwrap();
    assert_eq!(registry.len(), 1);

    // 无任何请求的情况下，应在 1 秒 TTL + 一个清理间隔内被回收
    let swept = wait_until(Duration::from_millis(2500), || registry.is_empty()).await;
    assert!(swept, "alias was not swept in time");
    assert_eq!(registry.scheduled_len(), 0);
    assert!(matches!(
        registry.resolve("blink"),
        Err(TtlinkerError::NotFound(_))
    ));

    handle.shutdown().await;
}

#[tokio::test]
async fn test_sweeper_respects_extended_ttl() {
    let (registry, clock) = manual_registry();
    let handle = Sweeper::new(registry.clone(), Duration::from_millis(10)).spawn();

    registry.create("http://example.com", 5, Some("extended")).unwrap();
    clock.advance(1);
    registry.update("extended", None, Some(20)).unwrap();

    // 越过旧过期时间，但未到 now_update + 20
    clock.advance(10);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve("extended").unwrap(), "http://example.com");

    clock.advance(10);
    assert!(wait_until(Duration::from_secs(2), || registry.is_empty()).await);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_create_resolve_wait_scenario() {
    let (registry, clock) = manual_registry();
    let handle = Sweeper::new(registry.clone(), Duration::from_millis(10)).spawn();

    let view = registry.create("http://example.com", 5, None).unwrap();
    let alias = view.alias;

    clock.advance(2);
    assert_eq!(registry.resolve(&alias).unwrap(), "http://example.com");
    assert_eq!(registry.analytics(&alias).unwrap().access_count, 1);

    clock.advance(4);
    assert!(wait_until(Duration::from_secs(2), || registry.is_empty()).await);
    assert!(matches!(
        registry.resolve(&alias),
        Err(TtlinkerError::NotFound(_))
    ));

    handle.shutdown().await;
}

#[tokio::test]
async fn test_sweeper_tolerates_deleted_and_renamed_aliases() {
    let (registry, clock) = manual_registry();
    let handle = Sweeper::new(registry.clone(), Duration::from_millis(10)).spawn();

    registry.create("http://a.com", 5, Some("deleted")).unwrap();
    registry.create("http://b.com", 5, Some("renamed")).unwrap();
    registry.delete("deleted").unwrap();
    registry.update("renamed", Some("moved"), Some(60)).unwrap();

    clock.advance(5);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(registry.len(), 1);
    assert!(registry.get("moved").is_some());
    assert!(registry.check_consistency());

    handle.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_the_task() {
    let (registry, clock) = manual_registry();
    let handle = Sweeper::new(registry.clone(), Duration::from_millis(10)).spawn();
    assert!(!handle.is_finished());

    handle.shutdown().await;

    // 停止后不再回收
    registry.create("http://a.com", 1, Some("orphan")).unwrap();
    clock.advance(5);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(registry.len(), 1);
}
