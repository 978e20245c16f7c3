//! Session marker registration, expiry, and device enumeration.

use std::time::Duration;

use streamlimit::prelude::*;

use crate::helpers::{TestApp, subscriber};

#[tokio::test(start_paused = true)]
async fn test_track_legacy_device_uses_default_ttl() {
    let app = TestApp::new();
    let user = subscriber(123, &[1]);
    let key = app.key(&user, 7654);

    app.tracker
        .track_stream(&user, InstanceId(7654), None, None)
        .await
        .unwrap();

    assert_eq!(app.store.get(&key).await.unwrap(), Some("legacy".to_string()));
    assert_eq!(app.store.ttl(&key), Some(Duration::from_secs(70)));
}

#[tokio::test(start_paused = true)]
async fn test_track_device_with_custom_ttl() {
    let app = TestApp::new();
    let user = subscriber(123, &[1]);
    let key = app.key(&user, 7654);

    app.tracker
        .track_stream(
            &user,
            InstanceId(7654),
            Some("iphone_6_plus"),
            Some(Duration::from_secs(60)),
        )
        .await
        .unwrap();

    assert_eq!(
        app.store.get(&key).await.unwrap(),
        Some("iphone_6_plus".to_string())
    );
    assert_eq!(app.store.ttl(&key), Some(Duration::from_secs(60)));
}

#[tokio::test(start_paused = true)]
async fn test_heartbeats_keep_stream_alive_until_they_stop() {
    let app = TestApp::new();
    let user = subscriber(123, &[1]);

    for _ in 0..5 {
        app.tracker
            .track_stream(&user, InstanceId(1), Some("roku"), None)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(app.tracker.current_stream_count(&user).await.unwrap(), 1);
    }

    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(app.tracker.current_stream_count(&user).await.unwrap(), 0);
}

#[tokio::test]
async fn test_expire_stream_is_idempotent() {
    let app = TestApp::new();
    let user = subscriber(123, &[2]);
    let key = app.key(&user, 7654);

    app.tracker
        .track_stream(&user, InstanceId(7654), Some("android"), None)
        .await
        .unwrap();
    app.tracker.expire_stream(&user, InstanceId(7654)).await.unwrap();
    app.tracker.expire_stream(&user, InstanceId(7654)).await.unwrap();

    assert_eq!(app.store.get(&key).await.unwrap(), None);
    assert_eq!(app.tracker.current_stream_count(&user).await.unwrap(), 0);
}

#[tokio::test]
async fn test_streaming_device_ids_lists_every_live_marker() {
    let app = TestApp::new();
    let user = subscriber(123, &[3]);

    app.tracker
        .track_stream(&user, InstanceId(7654), Some("android"), None)
        .await
        .unwrap();
    app.tracker
        .track_stream(&user, InstanceId(7655), None, None)
        .await
        .unwrap();

    let devices = app.tracker.streaming_device_ids(&user).await.unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().any(|d| d == "android"));
    assert!(devices.contains(&DeviceMarker::Legacy));

    let status = app.tracker.status(&user).await.unwrap();
    assert_eq!(status.active, 2);
    assert_eq!(status.remaining(), 1);
}

#[tokio::test]
async fn test_trackers_share_store_state() {
    let app = TestApp::new();
    let other = StreamLimitTracker::new(app.store.clone());
    let user = subscriber(5, &[1]);

    app.tracker
        .track_stream(&user, InstanceId(1), None, None)
        .await
        .unwrap();

    assert!(other.is_at_limit(&user).await.unwrap());
}
