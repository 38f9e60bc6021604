//! Handler bodies backed by the price store.

use std::sync::Arc;

use axum::http::StatusCode;

use crate::http::handler::{Handler, HandlerFn};
use crate::http::request::RequestDescriptor;
use crate::http::response::ResponseSink;
use crate::store::PriceStore;

pub const WELCOME: &str = "Welcome to the home page";

/// Fixed welcome page; does not touch the store.
pub fn home() -> impl Handler {
    HandlerFn::new(|_req: &RequestDescriptor, res: &mut dyn ResponseSink| {
        res.write_body(WELCOME.as_bytes());
    })
}

/// Serves the price of one item, chosen when the route is registered.
#[derive(Debug, Clone)]
pub struct ItemLookup {
    store: Arc<PriceStore>,
    name: String,
}

pub fn item_lookup(store: Arc<PriceStore>, name: impl Into<String>) -> ItemLookup {
    ItemLookup {
        store,
        name: name.into(),
    }
}

impl Handler for ItemLookup {
    fn handle(&self, request: &RequestDescriptor, response: &mut dyn ResponseSink) {
        match self.store.get(&self.name) {
            Some(price) => {
                response.write_body(format!("{}: {}\n", self.name, price).as_bytes());
            }
            None => {
                tracing::warn!(
                    request_id = %request.request_id(),
                    item = %self.name,
                    "Item missing from store"
                );
                response.write_status(StatusCode::NOT_FOUND);
                response.write_body(format!("no such item: {}\n", self.name).as_bytes());
            }
        }
    }
}

/// Lists every item in the store, one line each, in store order.
pub fn list_all(store: Arc<PriceStore>) -> Arc<PriceStore> {
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::BufferedResponse;
    use crate::store::Price;

    fn store() -> Arc<PriceStore> {
        Arc::new(PriceStore::from_iter([
            ("foo".to_string(), Price::from_pence(100)),
            ("bar".to_string(), Price::from_pence(200)),
        ]))
    }

    fn serve(handler: &dyn Handler, path: &str) -> BufferedResponse {
        let mut res = BufferedResponse::new();
        handler.handle(&RequestDescriptor::get(path), &mut res);
        res
    }

    #[test]
    fn home_writes_welcome() {
        let res = serve(&home(), "/");
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body_text(), WELCOME);
    }

    #[test]
    fn item_lookup_formats_price() {
        let res = serve(&item_lookup(store(), "foo"), "/foo");
        assert_eq!(res.body_text(), "foo: £1.00\n");

        let res = serve(&item_lookup(store(), "bar"), "/anything");
        assert_eq!(res.body_text(), "bar: £2.00\n");
    }

    #[test]
    fn item_lookup_of_unknown_item_is_404() {
        let res = serve(&item_lookup(store(), "baz"), "/baz");
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.body_text(), "no such item: baz\n");
    }

    #[test]
    fn list_all_writes_one_line_per_item() {
        let res = serve(&list_all(store()), "/anything/deep/path");
        let body = res.body_text();

        let mut lines: Vec<&str> = body.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["bar: £2.00", "foo: £1.00"]);
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn empty_store_lists_nothing() {
        let res = serve(&list_all(Arc::new(PriceStore::default())), "/");
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.body().is_empty());
    }
}
