use std::io::Write;

use crate::{
    common::{command::Command, error::AppError},
    domain::ledger::Ledger,
    worker::handlers::{catalog, customer, report, sale},
};

/// Tally of processed commands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
}

#[derive(Debug, Default)]
pub struct Processor {
    summary: Summary,
}
impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Runs one command. Query results are written to `out` as CSV.
    ///
    /// A ledger rejection comes back as [`AppError::Ledger`] and is counted;
    /// the ledger is unchanged in that case and the caller may carry on.
    pub fn process<W: Write>(
        &mut self,
        ledger: &mut Ledger,
        command: Command,
        out: &mut W,
    ) -> Result<(), AppError> {
        let result = dispatch(ledger, command, out);
        match &result {
            Ok(()) => self.summary.applied += 1,
            Err(AppError::Ledger(_)) => self.summary.rejected += 1,
            Err(_) => {}
        }
        result
    }
}

fn dispatch<W: Write>(ledger: &mut Ledger, command: Command, out: &mut W) -> Result<(), AppError> {
    match command {
        Command::AddCustomer {
            name,
            id,
            phone,
            email,
        } => customer::register(ledger, name, id, phone, email)?,
        Command::UpdateCustomer { id, update } => customer::update(ledger, &id, update)?,
        Command::RemoveCustomer { id } => customer::remove(ledger, &id)?,
        Command::AddItem {
            brand,
            model,
            price,
            stock,
        } => {
            catalog::register(ledger, brand, model, price, stock);
        }
        Command::Restock { index, units } => catalog::restock(ledger, index, units)?,
        Command::Sell { customer, items } => sale::handle(ledger, &customer, items)?,
        Command::FindCustomer { id } => report::find_customer(ledger, &id, out)?,
        Command::ListCustomers { sorted } => report::customers(ledger, sorted, out)?,
        Command::SearchItems { query } => report::search(ledger, &query, out)?,
        Command::ListItems { sorted } => report::items(ledger, sorted, out)?,
        Command::ListSales { customer } => report::sales(ledger, customer.as_deref(), out)?,
        Command::Revenue => report::revenue(ledger, out)?,
    }
    Ok(())
}
