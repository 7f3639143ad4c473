use crate::domain::catalog::ItemId;

/// Rejections raised by [`Ledger`](crate::domain::ledger::Ledger) operations.
///
/// Every variant is a normal, recoverable outcome: the ledger is left exactly
/// as it was before the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("a customer with id {0} already exists")]
    DuplicateCustomer(String),
    #[error("no customer with id {0}")]
    CustomerNotFound(String),
    #[error("customer {id} has {sales} recorded sale(s) and cannot be removed")]
    CustomerHasSales { id: String, sales: usize },
    #[error("index {index} is out of range (collection holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("no catalog item at index {0}")]
    UnknownItem(ItemId),
    #[error("insufficient stock for item {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: ItemId,
        available: u32,
        requested: u32,
    },
    #[error("a sale needs at least one item")]
    EmptySale,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("rejected: {0}")]
    Ledger(#[from] LedgerError),
}
