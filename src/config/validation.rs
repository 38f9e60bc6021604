//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (item routes reference existing items)
//! - Validate value ranges (timeouts > 0, prices finite and non-negative)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Duplicate patterns are left to registration, which rejects them at startup

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{HandlerKind, ServerConfig};
use crate::store::Price;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {value:?} is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("store.items.{item}: {reason}")]
    InvalidPrice { item: String, reason: String },

    #[error("routes[{index}]: pattern must not be empty")]
    EmptyPattern { index: usize },

    #[error("routes[{index}] ({pattern}): item handler requires an `item` name")]
    MissingItem { index: usize, pattern: String },

    #[error("routes[{index}] ({pattern}): item {item:?} is not in the store")]
    UnknownItem {
        index: usize,
        pattern: String,
        item: String,
    },

    #[error("routes[{index}] ({pattern}): `item` is only valid for item handlers")]
    UnexpectedItem { index: usize, pattern: String },
}

/// Check `config` for semantic errors, collecting all of them.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (item, amount) in &config.store.items {
        if let Err(e) = Price::from_pounds(*amount) {
            errors.push(ValidationError::InvalidPrice {
                item: item.clone(),
                reason: e.to_string(),
            });
        }
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
        }

        match (route.handler, &route.item) {
            (HandlerKind::Item, None) => errors.push(ValidationError::MissingItem {
                index,
                pattern: route.pattern.clone(),
            }),
            (HandlerKind::Item, Some(item)) if !config.store.items.contains_key(item) => {
                errors.push(ValidationError::UnknownItem {
                    index,
                    pattern: route.pattern.clone(),
                    item: item.clone(),
                })
            }
            (HandlerKind::Home | HandlerKind::ListAll, Some(_)) => {
                errors.push(ValidationError::UnexpectedItem {
                    index,
                    pattern: route.pattern.clone(),
                })
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.store.items.insert("broken".into(), -3.0);
        config.routes = vec![
            RouteConfig::new("", HandlerKind::Home),
            RouteConfig {
                pattern: "/x".into(),
                handler: HandlerKind::Item,
                item: None,
            },
            RouteConfig::item("/y", "missing"),
            RouteConfig {
                pattern: "/".into(),
                handler: HandlerKind::ListAll,
                item: Some("foo".into()),
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::EmptyPattern { index: 0 }));
        assert!(errors.contains(&ValidationError::MissingItem {
            index: 1,
            pattern: "/x".into()
        }));
        assert!(errors.contains(&ValidationError::UnknownItem {
            index: 2,
            pattern: "/y".into(),
            item: "missing".into()
        }));
        assert!(errors.contains(&ValidationError::UnexpectedItem {
            index: 3,
            pattern: "/".into()
        }));
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: "nope".into()
            }]
        );
    }
}
