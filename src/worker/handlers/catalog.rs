use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        catalog::{CatalogItem, ItemId},
        ledger::Ledger,
    },
};

pub fn register(ledger: &mut Ledger, brand: String, model: String, price: Money, stock: i64) -> ItemId {
    ledger.register_item(CatalogItem::new(brand, model, price, stock))
}

pub fn restock(ledger: &mut Ledger, index: usize, units: i64) -> Result<(), LedgerError> {
    ledger.replenish(index, units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_returns_consecutive_slots() {
        let mut ledger = Ledger::new();
        let a = register(&mut ledger, "Honda".into(), "CL500".into(), Money::from_cents(1), 3);
        let b = register(&mut ledger, "Honda".into(), "CL500".into(), Money::from_cents(1), -1);
        assert_eq!((a, b), (ItemId(0), ItemId(1)));
        assert_eq!(ledger.item(b).unwrap().stock(), 0);
    }

    #[test]
    fn restock_changes_only_the_target_slot() {
        let mut ledger = Ledger::new();
        let a = register(&mut ledger, "Honda".into(), "CL500".into(), Money::from_cents(1), 1);
        let b = register(&mut ledger, "Yamaha".into(), "XSR700".into(), Money::from_cents(1), 1);

        restock(&mut ledger, 1, 9).unwrap();
        assert_eq!(ledger.item(a).unwrap().stock(), 1);
        assert_eq!(ledger.item(b).unwrap().stock(), 10);

        assert_eq!(restock(&mut ledger, 1, 0), Err(LedgerError::InvalidQuantity(0)));
        assert_eq!(ledger.item(b).unwrap().stock(), 10);
    }
}
