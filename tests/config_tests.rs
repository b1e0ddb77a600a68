//! Endpoint and Configuration Tests
//!
//! These tests verify:
//! - Endpoint rendering from parts and from raw URLs
//! - Config defaults and builder overrides
//! - Transport settings derived from the config

use std::time::Duration;

use orion_client::network::{EndpointBuilder, DEFAULT_PORT};
use orion_client::{ClientConfig, Endpoint};

// =============================================================================
// Endpoint Tests
// =============================================================================

#[test]
fn test_endpoint_from_parts() {
    let endpoint = Endpoint::builder()
        .namespace("test_db")
        .shard("12345")
        .collection("users")
        .build();

    assert_eq!(endpoint.as_str(), "ws://localhost:5665/test_db@12345/users");
}

#[test]
fn test_endpoint_all_parts_overridden() {
    let endpoint = EndpointBuilder::default()
        .scheme("wss")
        .host("db.internal")
        .port(443)
        .namespace("orders")
        .shard("s1")
        .collection("archive")
        .build();

    assert_eq!(endpoint.to_string(), "wss://db.internal:443/orders@s1/archive");
}

#[test]
fn test_endpoint_without_namespace_routes_to_root() {
    let endpoint = Endpoint::builder().port(9000).build();
    assert_eq!(endpoint.as_str(), "ws://localhost:9000/");
}

#[test]
fn test_endpoint_raw_url_is_not_validated() {
    let endpoint = Endpoint::from("definitely not a url");
    assert_eq!(endpoint.as_str(), "definitely not a url");
}

#[test]
fn test_endpoint_default() {
    assert_eq!(
        Endpoint::default().as_str(),
        format!("ws://localhost:{}/", DEFAULT_PORT)
    );
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = ClientConfig::default();

    assert_eq!(config.connect_timeout_ms, 0);
    assert_eq!(config.connect_timeout(), None);
    assert!(config.nodelay);
    assert_eq!(config.endpoint, Endpoint::default());
}

#[test]
fn test_config_builder_overrides() {
    let config = ClientConfig::builder()
        .endpoint("ws://127.0.0.1:7000/a@b/c")
        .connect_timeout_ms(250)
        .max_message_size(Some(1024))
        .max_frame_size(None)
        .nodelay(false)
        .build();

    assert_eq!(config.endpoint.as_str(), "ws://127.0.0.1:7000/a@b/c");
    assert_eq!(config.connect_timeout(), Some(Duration::from_millis(250)));
    assert_eq!(config.max_message_size, Some(1024));
    assert_eq!(config.max_frame_size, None);
    assert!(!config.nodelay);
}

#[test]
fn test_config_websocket_limits() {
    let config = ClientConfig::builder()
        .max_message_size(Some(4096))
        .max_frame_size(Some(512))
        .build();

    let ws = config.websocket_config();
    assert_eq!(ws.max_message_size, Some(4096));
    assert_eq!(ws.max_frame_size, Some(512));
}
