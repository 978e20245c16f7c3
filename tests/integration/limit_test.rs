//! Stream limit evaluation and admission checks.

use streamlimit::prelude::*;

use crate::helpers::{TestApp, subscriber};

#[test]
fn test_limit_sums_subscriptions() {
    let app = TestApp::new();
    let user = subscriber(123, &[1, 3, 2]);
    assert_eq!(app.tracker.stream_limits(&user).get(), 6);
}

#[test]
fn test_unauthenticated_user_ignores_subscriptions() {
    let app = TestApp::new();
    let mut user = subscriber(123, &[1, 3, 2]);
    user.authenticated = false;
    assert_eq!(app.tracker.stream_limits(&user), StreamLimit::DEFAULT);
}

#[test]
fn test_limit_never_below_default() {
    let app = TestApp::new();
    assert_eq!(app.tracker.stream_limits(&subscriber(1, &[])).get(), 1);
    assert_eq!(app.tracker.stream_limits(&subscriber(1, &[0])).get(), 1);
}

#[tokio::test]
async fn test_second_stream_reaches_limit_of_two() {
    let app = TestApp::new();
    let user = subscriber(123, &[2]);

    app.tracker
        .track_stream(&user, InstanceId(1), Some("tv"), None)
        .await
        .unwrap();
    assert_eq!(app.tracker.current_stream_count(&user).await.unwrap(), 1);
    assert!(!app.tracker.is_at_limit(&user).await.unwrap());

    app.tracker
        .track_stream(&user, InstanceId(2), Some("phone"), None)
        .await
        .unwrap();
    assert_eq!(app.tracker.current_stream_count(&user).await.unwrap(), 2);
    assert!(app.tracker.is_at_limit(&user).await.unwrap());
}

#[tokio::test]
async fn test_users_do_not_share_counts() {
    let app = TestApp::new();
    let alice = subscriber(12, &[1]);
    let bob = subscriber(123, &[1]);

    app.tracker
        .track_stream(&alice, InstanceId(1), None, None)
        .await
        .unwrap();

    assert!(app.tracker.is_at_limit(&alice).await.unwrap());
    assert!(!app.tracker.is_at_limit(&bob).await.unwrap());
}

#[tokio::test]
async fn test_admit_keeps_heartbeats_alive_at_limit() {
    let app = TestApp::new();
    let user = subscriber(7, &[1]);

    let first = app
        .tracker
        .admit(&user, InstanceId(10), Some("web"), None)
        .await
        .unwrap();
    assert!(first.is_granted());

    let other = app
        .tracker
        .admit(&user, InstanceId(11), Some("tv"), None)
        .await
        .unwrap();
    assert!(!other.is_granted());

    let heartbeat = app
        .tracker
        .admit(&user, InstanceId(10), Some("web"), None)
        .await
        .unwrap();
    assert_eq!(
        heartbeat,
        Admission::Granted {
            limit: StreamLimit::DEFAULT,
            refreshed: true,
        }
    );
}
