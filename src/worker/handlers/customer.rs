use crate::{
    common::error::LedgerError,
    domain::{
        customer::{Customer, CustomerUpdate},
        ledger::Ledger,
    },
};

pub fn register(
    ledger: &mut Ledger,
    name: String,
    id: String,
    phone: String,
    email: String,
) -> Result<(), LedgerError> {
    ledger.register_customer(Customer::new(name, id, phone, email))
}

pub fn update(ledger: &mut Ledger, id: &str, update: CustomerUpdate) -> Result<(), LedgerError> {
    ledger.update_customer(id, update)
}

/// Removes a customer by id. The ledger refuses while they still have sales.
pub fn remove(ledger: &mut Ledger, id: &str) -> Result<(), LedgerError> {
    let index = ledger
        .customer_position(id)
        .ok_or_else(|| LedgerError::CustomerNotFound(id.to_string()))?;
    ledger.remove_customer_at(index)?;
    Ok(())
}
