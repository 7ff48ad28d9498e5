//! Session store lifecycle tests

use coursepad::auth::{ManualClock, SessionStore};
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn test_valid_right_after_create() {
    let store = SessionStore::new();
    let token = store.create("user-1");
    assert_eq!(store.validate(&token).as_deref(), Some("user-1"));
}

#[test]
fn test_invalid_after_revoke() {
    let store = SessionStore::new();
    let token = store.create("user-1");

    assert!(store.revoke(&token));
    assert!(store.validate(&token).is_none());
    assert!(!store.revoke(&token));
}

#[test]
fn test_zero_duration_with_wall_clock() {
    let store = SessionStore::with_ttl(chrono::Duration::zero());
    let token = store.create("user-1");

    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(store.validate(&token).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_expired_is_lazily_purged() {
    let clock = ManualClock::default();
    let store = SessionStore::with_clock(chrono::Duration::seconds(5), Arc::new(clock.clone()));
    let a = store.create("user-1");
    let b = store.create("user-2");

    clock.advance(chrono::Duration::seconds(6));
    // Still stored until touched
    assert_eq!(store.len(), 2);

    assert!(store.validate(&a).is_none());
    assert_eq!(store.len(), 1);
    assert!(store.get(&b).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_revoking_expired_session_reports_presence() {
    let clock = ManualClock::default();
    let store = SessionStore::with_clock(chrono::Duration::seconds(5), Arc::new(clock.clone()));
    let token = store.create("user-1");

    clock.advance(chrono::Duration::seconds(6));
    // Not yet evicted, so it still counts as removed here
    assert!(store.revoke(&token));
}

#[test]
fn test_tokens_are_unique() {
    let store = SessionStore::new();
    let tokens: HashSet<String> = (0..500).map(|_| store.create("user-1")).collect();
    assert_eq!(tokens.len(), 500);
    assert_eq!(store.len(), 500);
}

#[test]
fn test_default_ttl_is_one_day() {
    let store = SessionStore::new();
    assert_eq!(store.ttl(), chrono::Duration::hours(24));

    let token = store.create("user-1");
    let session = store.get(&token).expect("Session should exist");
    assert_eq!(session.expires_at - session.created_at, chrono::Duration::hours(24));
}

#[tokio::test]
async fn test_sweeper_leaves_live_sessions() {
    let clock = ManualClock::default();
    let store = SessionStore::with_clock(chrono::Duration::seconds(10), Arc::new(clock.clone()));
    let old = store.create("user-1");
    clock.advance(chrono::Duration::seconds(8));
    let fresh = store.create("user-2");
    clock.advance(chrono::Duration::seconds(5));

    let handle = store.spawn_sweeper(std::time::Duration::from_millis(10));
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    handle.abort();

    assert_eq!(store.len(), 1);
    assert!(store.validate(&old).is_none());
    assert!(store.validate(&fresh).is_some());
}
