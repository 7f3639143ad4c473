use std::io::Write;

use crate::{
    common::money::Money,
    domain::{
        catalog::{CatalogItem, ItemId},
        customer::Customer,
        ledger::Ledger,
        sale::SaleRecord,
    },
};

#[derive(serde::Serialize)]
/// Output row with headers `index,id,name,phone,email`.
struct CustomerRow<'a> {
    index: usize,
    id: &'a str,
    name: &'a str,
    phone: &'a str,
    email: &'a str,
}

#[derive(serde::Serialize)]
/// Output row with headers `index,brand,model,price,stock`. `index` is the
/// catalog slot used by `item_restock` and `sale`.
struct ItemRow<'a> {
    index: usize,
    brand: &'a str,
    model: &'a str,
    price: String,
    stock: u32,
}

#[derive(serde::Serialize)]
/// Output row with headers `date,customer_id,customer_name,units,amount`.
struct SaleRow<'a> {
    date: String,
    customer_id: &'a str,
    customer_name: &'a str,
    units: usize,
    amount: String,
}

#[derive(serde::Serialize)]
struct RevenueRow {
    sales: usize,
    total: String,
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer)
}

/// Writes customers in the order given. `index` is the position in that
/// sequence.
///
/// # Examples
///
/// ```
/// use dealership_ledger::domain::customer::Customer;
/// use dealership_ledger::io::writer::write_customers;
///
/// let customers = vec![Customer::new("Ana", "1A", "600", "ana@example.com")];
/// let mut out = Vec::new();
/// write_customers(&mut out, &customers).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "index,id,name,phone,email\n0,1A,Ana,600,ana@example.com\n");
/// ```
pub fn write_customers<'a, W: Write>(
    writer: W,
    customers: impl IntoIterator<Item = &'a Customer>,
) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);
    for (index, c) in customers.into_iter().enumerate() {
        wtr.serialize(CustomerRow {
            index,
            id: c.id(),
            name: &c.name,
            phone: &c.phone,
            email: &c.email,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes catalog entries, each with its slot index and current stock.
pub fn write_items<'a, W: Write>(
    writer: W,
    items: impl IntoIterator<Item = (ItemId, &'a CatalogItem)>,
) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);
    for (id, item) in items {
        wtr.serialize(ItemRow {
            index: id.index(),
            brand: item.brand(),
            model: item.model(),
            price: item.price().to_string_2dp(),
            stock: item.stock(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes sales in the order given, resolving customer names through the
/// ledger.
pub fn write_sales<'a, W: Write>(
    writer: W,
    ledger: &Ledger,
    sales: impl IntoIterator<Item = &'a SaleRecord>,
) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);
    for sale in sales {
        let customer_name = ledger
            .find_customer(sale.customer_id())
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        wtr.serialize(SaleRow {
            date: sale.date().format("%Y-%m-%d").to_string(),
            customer_id: sale.customer_id(),
            customer_name,
            units: sale.units(),
            amount: sale.amount().to_string_2dp(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_revenue<W: Write>(writer: W, sales: usize, total: Money) -> Result<(), csv::Error> {
    let mut wtr = csv_writer(writer);
    wtr.serialize(RevenueRow {
        sales,
        total: total.to_string_2dp(),
    })?;
    wtr.flush()?;
    Ok(())
}
