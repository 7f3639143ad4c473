use crate::{
    common::error::LedgerError,
    domain::{catalog::ItemId, ledger::Ledger},
};

/// Sells `items` (one entry per unit) to `customer`.
///
/// The sale is priced first, then stock is reserved, and only then is the
/// record stored. A failure at any step leaves the ledger unchanged.
pub fn handle(ledger: &mut Ledger, customer: &str, items: Vec<ItemId>) -> Result<(), LedgerError> {
    let sale = ledger.draft_sale(customer, items)?;
    let request: Vec<ItemId> = sale.items().collect();
    ledger.reserve_stock(&request)?;
    ledger.record_sale(sale);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::money::Money,
        domain::{catalog::CatalogItem, customer::Customer},
    };

    fn seeded() -> (Ledger, ItemId, ItemId) {
        let mut ledger = Ledger::new();
        ledger
            .register_customer(Customer::new("Ana", "11111111A", "600", "ana@example.com"))
            .unwrap();
        let a = ledger.register_item(CatalogItem::new("Honda", "CL500", Money::from_cents(679000), 3));
        let b = ledger.register_item(CatalogItem::new("Yamaha", "XSR700", Money::from_cents(879999), 2));
        (ledger, a, b)
    }

    #[test]
    fn handle_reserves_and_records() {
        let (mut ledger, a, b) = seeded();
        handle(&mut ledger, "11111111a", vec![a, a, b]).unwrap();

        assert_eq!(ledger.item(a).unwrap().stock(), 1);
        assert_eq!(ledger.item(b).unwrap().stock(), 1);
        assert_eq!(ledger.sales().len(), 1);
        assert_eq!(ledger.sales()[0].customer_id(), "11111111A");
        assert_eq!(ledger.total_revenue(), Money::from_cents(679000 * 2 + 879999));
    }

    #[test]
    fn handle_short_stock_records_nothing() {
        let (mut ledger, a, b) = seeded();
        let err = handle(&mut ledger, "11111111A", vec![a, a, b, b, b]).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientStock { requested: 3, .. }));

        assert_eq!(ledger.item(a).unwrap().stock(), 3);
        assert_eq!(ledger.item(b).unwrap().stock(), 2);
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn handle_unknown_customer_touches_no_stock() {
        let (mut ledger, a, _) = seeded();
        assert_eq!(
            handle(&mut ledger, "nobody", vec![a]),
            Err(LedgerError::CustomerNotFound("nobody".into()))
        );
        assert_eq!(ledger.item(a).unwrap().stock(), 3);
    }
}
