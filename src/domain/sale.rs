use chrono::NaiveDate;

use crate::{common::money::Money, domain::catalog::ItemId};

/// One unit sold: which catalog slot, and the price it carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleLine {
    pub item: ItemId,
    pub price: Money,
}

/// A completed sale. Built once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    customer_id: String,
    lines: Vec<SaleLine>,
    date: NaiveDate,
}

impl SaleRecord {
    /// Takes the lines as given; callers make sure there is at least one.
    pub fn new(customer_id: impl Into<String>, lines: Vec<SaleLine>, date: NaiveDate) -> Self {
        Self {
            customer_id: customer_id.into(),
            lines,
            date,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.lines.iter().map(|line| line.item)
    }

    pub fn units(&self) -> usize {
        self.lines.len()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Money {
        self.lines.iter().map(|line| line.price).sum()
    }

    pub fn belongs_to(&self, customer_id: &str) -> bool {
        self.customer_id.to_lowercase() == customer_id.to_lowercase()
    }
}
