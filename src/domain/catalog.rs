use std::fmt;

use crate::common::money::Money;

/// Storage slot of a catalog item inside the ledger.
///
/// Stock pools are told apart by slot, never by brand/model: two entries
/// that describe the same motorcycle are still separate stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

impl ItemId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    brand: String,
    model: String,
    price: Money,
    stock: u32,
}

impl CatalogItem {
    /// A negative initial stock is clamped to zero.
    pub fn new(brand: impl Into<String>, model: impl Into<String>, price: Money, stock: i64) -> Self {
        let stock = u32::try_from(stock.max(0)).unwrap_or(u32::MAX);
        Self {
            brand: brand.into(),
            model: model.into(),
            price,
            stock,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.brand.to_lowercase().contains(needle_lowercase)
            || self.model.to_lowercase().contains(needle_lowercase)
    }

    /// Removes `quantity` units.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` exceeds the current stock. Callers check
    /// availability first; reaching this panic means that check was skipped.
    pub fn take_stock(&mut self, quantity: u32) {
        assert!(
            quantity <= self.stock,
            "stock underflow on {} {}: taking {} of {}",
            self.brand,
            self.model,
            quantity,
            self.stock
        );
        self.stock -= quantity;
    }

    pub fn add_stock(&mut self, units: u32) {
        self.stock = self.stock.saturating_add(units);
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) [stock: {}]",
            self.brand, self.model, self.price, self.stock
        )
    }
}
