use crate::{
    common::money::Money,
    domain::{catalog::ItemId, customer::CustomerUpdate},
};

/// A single shell command, produced by the script reader and executed by
/// the processor against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddCustomer {
        name: String,
        id: String,
        phone: String,
        email: String,
    },
    UpdateCustomer { id: String, update: CustomerUpdate },
    RemoveCustomer { id: String },
    FindCustomer { id: String },
    ListCustomers { sorted: bool },
    AddItem {
        brand: String,
        model: String,
        price: Money,
        stock: i64,
    },
    SearchItems { query: String },
    ListItems { sorted: bool },
    Restock { index: usize, units: i64 },
    /// One entry in `items` per unit sold.
    Sell { customer: String, items: Vec<ItemId> },
    ListSales { customer: Option<String> },
    Revenue,
}
