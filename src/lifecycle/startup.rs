//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the price store from configuration
//! - Register every configured route into a fresh dispatcher
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is served
//! - Routes register in configuration order; the matcher makes order irrelevant
//! - Listeners start last (traffic only when the dispatcher is frozen)

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{HandlerKind, ListenerConfig, RouteConfig, ServerConfig};
use crate::routing::{Dispatcher, RegistrationError};
use crate::store::{home, item_lookup, list_all, PriceError, PriceStore};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid price store: {0}")]
    Store(#[from] PriceError),

    #[error("route {pattern:?}: item handler requires an item name")]
    MissingItem { pattern: String },

    #[error("route registration failed: {0}")]
    Registration(#[from] RegistrationError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the transport needs, built from a validated configuration.
#[derive(Debug)]
pub struct Application {
    pub store: Arc<PriceStore>,
    pub dispatcher: Arc<Dispatcher>,
}

impl Application {
    pub fn build(config: &ServerConfig) -> Result<Self, StartupError> {
        let store = Arc::new(PriceStore::from_pounds(&config.store.items)?);
        tracing::info!(items = store.len(), "Price store loaded");

        let dispatcher = build_dispatcher(&config.routes, Arc::clone(&store))?;
        for pattern in dispatcher.registry().patterns() {
            tracing::info!(pattern = %pattern, kind = %pattern.kind(), "Route registered");
        }

        Ok(Self {
            store,
            dispatcher: Arc::new(dispatcher),
        })
    }
}

/// Register each route, in order, into a new dispatcher.
pub fn build_dispatcher(
    routes: &[RouteConfig],
    store: Arc<PriceStore>,
) -> Result<Dispatcher, StartupError> {
    let mut dispatcher = Dispatcher::new();

    for route in routes {
        match route.handler {
            HandlerKind::Home => dispatcher.register(&route.pattern, home())?,
            HandlerKind::ListAll => {
                dispatcher.register(&route.pattern, list_all(Arc::clone(&store)))?
            }
            HandlerKind::Item => {
                let item = route.item.as_ref().ok_or_else(|| StartupError::MissingItem {
                    pattern: route.pattern.clone(),
                })?;
                dispatcher.register(&route.pattern, item_lookup(Arc::clone(&store), item.as_str()))?
            }
        }
    }

    Ok(dispatcher)
}

/// Bind the configured listen address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handler::Handler;
    use crate::http::request::RequestDescriptor;
    use crate::http::response::BufferedResponse;
    use crate::store::Price;
    use axum::http::StatusCode;

    fn store() -> Arc<PriceStore> {
        Arc::new(PriceStore::from_iter([
            ("foo".to_string(), Price::from_pence(100)),
            ("bar".to_string(), Price::from_pence(200)),
        ]))
    }

    fn get(dispatcher: &Dispatcher, path: &str) -> BufferedResponse {
        let mut res = BufferedResponse::new();
        dispatcher.handle(&RequestDescriptor::get(path), &mut res);
        res
    }

    #[test]
    fn default_routes_reproduce_home_foo_bar() {
        let app = Application::build(&ServerConfig::default()).unwrap();

        assert_eq!(app.dispatcher.registry().len(), 3);
        assert_eq!(get(&app.dispatcher, "/foo").body_text(), "foo: £1.00\n");
        assert_eq!(get(&app.dispatcher, "/bar").body_text(), "bar: £2.00\n");
        assert_eq!(
            get(&app.dispatcher, "/baz").body_text(),
            "Welcome to the home page"
        );
    }

    #[test]
    fn list_all_on_root_subtree() {
        let routes = vec![RouteConfig::new("/", HandlerKind::ListAll)];
        let dispatcher = build_dispatcher(&routes, store()).unwrap();

        let res = get(&dispatcher, "/anything/deep/path");
        assert_eq!(res.status(), StatusCode::OK);
        let mut lines: Vec<String> = res.body_text().lines().map(String::from).collect();
        lines.sort();
        assert_eq!(lines, vec!["bar: £2.00", "foo: £1.00"]);
    }

    #[test]
    fn duplicate_route_aborts_startup() {
        let routes = vec![
            RouteConfig::item("/foo", "foo"),
            RouteConfig::item("/foo", "bar"),
        ];
        let err = build_dispatcher(&routes, store()).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Registration(RegistrationError::DuplicateExactPattern(ref p)) if p == "/foo"
        ));
    }

    #[test]
    fn item_route_without_item_aborts_startup() {
        let routes = vec![RouteConfig::new("/foo", HandlerKind::Item)];
        let err = build_dispatcher(&routes, store()).unwrap_err();
        assert!(matches!(err, StartupError::MissingItem { .. }));
    }

    #[test]
    fn bad_price_aborts_startup() {
        let mut config = ServerConfig::default();
        config.store.items.insert("foo".into(), f64::NAN);
        let err = Application::build(&config).unwrap_err();
        assert!(matches!(err, StartupError::Store(PriceError::NonFinite(_))));
    }

    #[tokio::test]
    async fn bind_reports_address_on_failure() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();
        let config = ListenerConfig {
            bind_address: address.clone(),
        };

        let err = bind(&config).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
        assert!(err.to_string().contains(&address));
    }
}
