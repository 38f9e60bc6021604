//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Price store contents.
    pub store: StoreConfig,

    /// Route table, registered in order at startup.
    pub routes: Vec<RouteConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            store: StoreConfig::default(),
            routes: default_routes(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Price store contents: item name to price in pounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub items: BTreeMap<String, f64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            items: BTreeMap::from([("foo".to_string(), 1.0), ("bar".to_string(), 2.0)]),
        }
    }
}

/// Which built-in handler a route is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    /// Fixed welcome page.
    Home,
    /// Price of the item named by `RouteConfig::item`.
    Item,
    /// Every item in the store.
    ListAll,
}

/// A single pattern-to-handler binding.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Exact pattern (`/foo`) or subtree pattern (`/api/`).
    pub pattern: String,

    /// Handler serving the pattern.
    pub handler: HandlerKind,

    /// Item name, required for `item` handlers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl RouteConfig {
    pub fn new(pattern: impl Into<String>, handler: HandlerKind) -> Self {
        Self {
            pattern: pattern.into(),
            handler,
            item: None,
        }
    }

    pub fn item(pattern: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            handler: HandlerKind::Item,
            item: Some(item.into()),
        }
    }
}

/// The home / foo / bar layout.
fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::item("/foo", "foo"),
        RouteConfig::item("/bar", "bar"),
        RouteConfig::new("/", HandlerKind::Home),
    ]
}
