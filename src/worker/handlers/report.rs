use std::io::Write;

use crate::{
    common::error::{AppError, LedgerError},
    domain::{catalog::ItemId, ledger::Ledger},
    io::writer,
};

pub fn find_customer<W: Write>(ledger: &Ledger, id: &str, out: W) -> Result<(), AppError> {
    let customer = ledger
        .find_customer(id)
        .ok_or_else(|| LedgerError::CustomerNotFound(id.to_string()))?;
    writer::write_customers(out, [customer])?;
    Ok(())
}

pub fn customers<W: Write>(ledger: &Ledger, sorted: bool, out: W) -> Result<(), AppError> {
    if sorted {
        writer::write_customers(out, &ledger.customers_sorted_by_name())?;
    } else {
        writer::write_customers(out, ledger.customers())?;
    }
    Ok(())
}

pub fn items<W: Write>(ledger: &Ledger, sorted: bool, out: W) -> Result<(), AppError> {
    if sorted {
        let view = ledger.items_sorted_by_brand();
        writer::write_items(out, view.iter().map(|(id, item)| (*id, item)))?;
    } else {
        let live = ledger.items().iter().enumerate();
        writer::write_items(out, live.map(|(i, item)| (ItemId(i), item)))?;
    }
    Ok(())
}

pub fn search<W: Write>(ledger: &Ledger, query: &str, out: W) -> Result<(), AppError> {
    let hits = ledger.search_items(query);
    writer::write_items(out, hits.iter().map(|(id, item)| (*id, item)))?;
    Ok(())
}

pub fn sales<W: Write>(ledger: &Ledger, customer: Option<&str>, out: W) -> Result<(), AppError> {
    match customer {
        Some(id) => writer::write_sales(out, ledger, ledger.sales_for_customer(id))?,
        None => writer::write_sales(out, ledger, ledger.sales())?,
    }
    Ok(())
}

pub fn revenue<W: Write>(ledger: &Ledger, out: W) -> Result<(), AppError> {
    writer::write_revenue(out, ledger.sales().len(), ledger.total_revenue())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::money::Money,
        domain::{catalog::CatalogItem, customer::Customer},
        worker::handlers::sale,
    };

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<(), AppError>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for (name, id) in [("bob", "3C"), ("Alice", "1A"), ("alice", "2B")] {
            ledger
                .register_customer(Customer::new(name, id, "600", "x@example.com"))
                .unwrap();
        }
        ledger.register_item(CatalogItem::new("Yamaha", "XSR700", Money::from_cents(10000), 2));
        ledger.register_item(CatalogItem::new("Honda", "CL500", Money::from_cents(25050), 2));
        ledger
    }

    #[test]
    fn sorted_customer_listing() {
        let ledger = ledger();
        let s = render(|out| customers(&ledger, true, out));
        let names: Vec<_> = s
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(2).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "alice", "bob"]);
    }

    #[test]
    fn sorted_item_listing_keeps_slot_indices() {
        let ledger = ledger();
        let s = render(|out| items(&ledger, true, out));
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines[1], "1,Honda,CL500,250.50,2");
        assert_eq!(lines[2], "0,Yamaha,XSR700,100.00,2");
    }

    #[test]
    fn search_lists_only_matches() {
        let ledger = ledger();
        let s = render(|out| search(&ledger, "YAM", out));
        assert_eq!(s, "index,brand,model,price,stock\n0,Yamaha,XSR700,100.00,2\n");
    }

    #[test]
    fn find_missing_customer_is_a_rejection() {
        let ledger = ledger();
        let mut out = Vec::new();
        let err = find_customer(&ledger, "9Z", &mut out).unwrap_err();
        assert!(matches!(err, AppError::Ledger(LedgerError::CustomerNotFound(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn revenue_and_sales_per_customer() {
        let mut ledger = ledger();
        sale::handle(&mut ledger, "1A", vec![ItemId(0)]).unwrap();
        sale::handle(&mut ledger, "2B", vec![ItemId(1)]).unwrap();

        let s = render(|out| revenue(&ledger, out));
        assert_eq!(s, "sales,total\n2,350.50\n");

        let s = render(|out| sales(&ledger, Some("2b"), out));
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(",2B,alice,1,250.50"));
    }
}
