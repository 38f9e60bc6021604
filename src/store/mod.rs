//! In-memory price store.
//!
//! # Responsibilities
//! - Map item names to prices
//! - Serve as a handler listing every item
//!
//! # Design Decisions
//! - Built once at startup and never mutated, so readers need no locks
//! - Iteration order is unspecified; callers must not rely on it

pub mod handlers;
pub mod price;

use std::collections::HashMap;

use crate::http::handler::Handler;
use crate::http::request::RequestDescriptor;
use crate::http::response::ResponseSink;

pub use handlers::{home, item_lookup, list_all, ItemLookup};
pub use price::{Price, PriceError, CURRENCY_SYMBOL};

/// Read-only mapping from item name to price.
#[derive(Debug, Clone, Default)]
pub struct PriceStore {
    items: HashMap<String, Price>,
}

impl PriceStore {
    pub fn new(items: HashMap<String, Price>) -> Self {
        Self { items }
    }

    /// Convert decimal amounts into a store, failing on the first bad price.
    pub fn from_pounds<'a, I>(items: I) -> Result<Self, PriceError>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let items = items
            .into_iter()
            .map(|(name, amount)| Price::from_pounds(*amount).map(|price| (name.clone(), price)))
            .collect::<Result<HashMap<_, _>, PriceError>>()?;
        Ok(Self { items })
    }

    pub fn get(&self, name: &str) -> Option<Price> {
        self.items.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Price)> {
        self.items.iter().map(|(name, price)| (name.as_str(), *price))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, Price)> for PriceStore {
    fn from_iter<T: IntoIterator<Item = (String, Price)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// The whole store answers with one `<name>: <price>` line per item.
impl Handler for PriceStore {
    fn handle(&self, _request: &RequestDescriptor, response: &mut dyn ResponseSink) {
        for (name, price) in self.iter() {
            response.write_body(format!("{}: {}\n", name, price).as_bytes());
        }
    }
}
