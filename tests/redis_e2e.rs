//! End-to-end tests against a real Redis server
//!
//! These tests start Redis with testcontainers and connect several nodes to
//! it. They need a Docker daemon, so they are ignored by default; run them
//! with `cargo test -- --ignored`.

mod common;

use std::time::Duration;

use serde_json::{json, Value};

use common::{record_channel, TestRedis};
use redis_messaging::{Filter, MessagingError, MessagingSettings, RedisApi};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_filtered_messages_over_redis() {
    let redis = TestRedis::start().await;
    let proxy = redis.node(Some("proxy")).await;
    let lobby = redis.node(Some("lobby-1")).await;
    let game = redis.node(Some("game-1")).await;

    let mut lobby_inbox = record_channel(&lobby, "commands");
    let mut game_inbox = record_channel(&game, "commands");
    let channel = proxy
        .register_channel("commands", |_: &redis_messaging::ReceivedMessage| {})
        .unwrap();
    lobby.start_listeners().await.unwrap();
    game.start_listeners().await.unwrap();

    proxy.publish_filtered("lobby-1", &channel, "restart;now").await.unwrap();
    proxy.publish_message(&channel, "marker").await.unwrap();

    let targeted = lobby_inbox.next().await;
    assert_eq!(targeted.filter, Filter::from("lobby-1"));
    assert_eq!(targeted.payload, "restart;now");
    assert_eq!(lobby_inbox.next().await.payload, "marker");
    assert_eq!(game_inbox.next().await.payload, "marker");

    for node in [proxy, lobby, game] {
        node.shutdown().await;
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_data_request_over_redis() {
    let redis = TestRedis::start().await;
    let proxy = redis.node(Some("proxy")).await;
    let lobby = redis.node(Some("lobby-1")).await;

    lobby.respond_to("online", |data: Value| json!({ "online": 17, "asked": data }));
    proxy.start_listeners().await.unwrap();
    lobby.start_listeners().await.unwrap();

    let response = proxy
        .request_data("lobby-1", "online", json!("eu"))
        .await
        .unwrap();
    assert_eq!(response.data, Some(json!({ "online": 17, "asked": "eu" })));

    let missing = proxy.request_data("lobby-1", "offline", Value::Null).await.unwrap();
    assert!(missing.timed_out());

    proxy.shutdown().await;
    lobby.shutdown().await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_lost_subscription_stops_listener_until_restarted() {
    let redis = TestRedis::start().await;
    let sender = redis.node(Some("sender")).await;
    let receiver = redis.node(Some("receiver")).await;

    let mut inbox = record_channel(&receiver, "events");
    let channel = sender
        .register_channel("events", |_: &redis_messaging::ReceivedMessage| {})
        .unwrap();
    receiver.start_listeners().await.unwrap();
    assert!(receiver.is_listening().await);

    let client = redis::Client::open(redis.uri.as_str()).unwrap();
    let mut admin = client.get_multiplexed_async_connection().await.unwrap();
    let killed: i64 = redis::cmd("CLIENT")
        .arg("KILL")
        .arg("TYPE")
        .arg("pubsub")
        .query_async(&mut admin)
        .await
        .unwrap();
    assert_eq!(killed, 1);

    let stopped = tokio::time::timeout(Duration::from_secs(2), async {
        while receiver.is_listening().await {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(stopped.is_ok(), "listener kept running after its connection was killed");

    receiver.start_listeners().await.unwrap();
    sender.publish_filtered("receiver", &channel, "back").await.unwrap();
    assert_eq!(inbox.next().await.payload, "back");

    sender.shutdown().await;
    receiver.shutdown().await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_bare_uri_without_password_connects() {
    let redis = TestRedis::start().await;

    let node = RedisApi::from_uri_with_password(&redis.uri, None, MessagingSettings::default())
        .await
        .unwrap();
    let channel = node.register_channel("ping", |_: &redis_messaging::ReceivedMessage| {}).unwrap();
    node.publish_message(&channel, "hello").await.unwrap();
    node.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_server_fails_to_connect() {
    let settings = MessagingSettings {
        redis_timeout: Duration::from_millis(200),
        ..MessagingSettings::default()
    };

    let result = RedisApi::from_uri("redis://127.0.0.1:1", settings).await;
    assert!(matches!(result, Err(MessagingError::CouldNotConnect(_))));
}

#[tokio::test]
async fn test_malformed_uri_is_rejected() {
    let result = RedisApi::from_uri("http://localhost:6379", MessagingSettings::default()).await;
    assert!(matches!(result, Err(MessagingError::InvalidUri(_))));
}
