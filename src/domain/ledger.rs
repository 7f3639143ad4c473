use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        catalog::{CatalogItem, ItemId},
        customer::{Customer, CustomerUpdate},
        sale::{SaleLine, SaleRecord},
    },
};

/// In-memory state of the dealership: customers, catalog and sales.
///
/// Reads hand out shared borrows or owned copies; every change goes through
/// one of the mutators below, each of which either applies completely or
/// leaves the ledger untouched and returns a [`LedgerError`].
#[derive(Debug, Default)]
pub struct Ledger {
    customers: Vec<Customer>,
    items: Vec<CatalogItem>,
    sales: Vec<SaleRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // Customers

    pub fn register_customer(&mut self, customer: Customer) -> Result<(), LedgerError> {
        if self.find_customer(customer.id()).is_some() {
            return Err(LedgerError::DuplicateCustomer(customer.id().to_string()));
        }
        info!(id = customer.id(), name = %customer.name, "customer registered");
        self.customers.push(customer);
        Ok(())
    }

    pub fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.has_id(id))
    }

    pub fn customer_position(&self, id: &str) -> Option<usize> {
        self.customers.iter().position(|c| c.has_id(id))
    }

    pub fn update_customer(&mut self, id: &str, update: CustomerUpdate) -> Result<(), LedgerError> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.has_id(id))
            .ok_or_else(|| LedgerError::CustomerNotFound(id.to_string()))?;
        customer.apply(update);
        info!(id = customer.id(), "customer updated");
        Ok(())
    }

    /// Removes the customer stored at `index`, refusing while any recorded
    /// sale still points at them.
    pub fn remove_customer_at(&mut self, index: usize) -> Result<Customer, LedgerError> {
        let customer = self.customers.get(index).ok_or(LedgerError::IndexOutOfRange {
            index,
            len: self.customers.len(),
        })?;
        let sales = self.sales_for_customer(customer.id()).len();
        if sales > 0 {
            return Err(LedgerError::CustomerHasSales {
                id: customer.id().to_string(),
                sales,
            });
        }
        let removed = self.customers.remove(index);
        info!(id = removed.id(), "customer removed");
        Ok(removed)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customers_sorted_by_name(&self) -> Vec<Customer> {
        let mut sorted = self.customers.clone();
        // sort_by_cached_key is stable, so equal names keep insertion order.
        sorted.sort_by_cached_key(|c| c.name.to_lowercase());
        sorted
    }

    // Catalog

    pub fn register_item(&mut self, item: CatalogItem) -> ItemId {
        let id = ItemId(self.items.len());
        info!(%id, brand = item.brand(), model = item.model(), stock = item.stock(), "item registered");
        self.items.push(item);
        id
    }

    pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(id.index())
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn search_items(&self, query: &str) -> Vec<(ItemId, CatalogItem)> {
        let needle = query.to_lowercase();
        self.indexed_items()
            .filter(|(_, item)| item.matches(&needle))
            .collect()
    }

    pub fn items_sorted_by_brand(&self) -> Vec<(ItemId, CatalogItem)> {
        let mut sorted: Vec<_> = self.indexed_items().collect();
        sorted.sort_by_cached_key(|(_, item)| (item.brand().to_lowercase(), item.model().to_lowercase()));
        sorted
    }

    pub fn replenish(&mut self, index: usize, units: i64) -> Result<(), LedgerError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        if units <= 0 {
            return Err(LedgerError::InvalidQuantity(units));
        }
        item.add_stock(u32::try_from(units).unwrap_or(u32::MAX));
        info!(index, units, stock = item.stock(), "stock replenished");
        Ok(())
    }

    fn indexed_items(&self) -> impl Iterator<Item = (ItemId, CatalogItem)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i), item.clone()))
    }

    // Stock reservation

    /// Takes one unit of stock per entry in `request`, or none at all.
    ///
    /// Repeated entries are summed per slot before anything is checked, so
    /// three requests against a stock of two fail as a whole.
    pub fn reserve_stock(&mut self, request: &[ItemId]) -> Result<(), LedgerError> {
        let wanted = aggregate(request);

        for (&id, &requested) in &wanted {
            let item = self.item(id).ok_or(LedgerError::UnknownItem(id))?;
            if item.stock() < requested {
                debug!(%id, available = item.stock(), requested, "reservation refused");
                return Err(LedgerError::InsufficientStock {
                    item: id,
                    available: item.stock(),
                    requested,
                });
            }
        }

        for (id, requested) in wanted {
            self.items[id.index()].take_stock(requested);
        }
        debug!(units = request.len(), "reservation committed");
        Ok(())
    }

    // Sales

    /// Builds a sale dated today without touching stock.
    pub fn draft_sale(&self, customer_id: &str, items: Vec<ItemId>) -> Result<SaleRecord, LedgerError> {
        self.draft_sale_on(customer_id, items, Local::now().date_naive())
    }

    pub fn draft_sale_on(
        &self,
        customer_id: &str,
        items: Vec<ItemId>,
        date: NaiveDate,
    ) -> Result<SaleRecord, LedgerError> {
        let customer = self
            .find_customer(customer_id)
            .ok_or_else(|| LedgerError::CustomerNotFound(customer_id.to_string()))?;
        if items.is_empty() {
            return Err(LedgerError::EmptySale);
        }
        let lines = items
            .into_iter()
            .map(|id| {
                self.item(id)
                    .map(|item| SaleLine { item: id, price: item.price() })
                    .ok_or(LedgerError::UnknownItem(id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SaleRecord::new(customer.id(), lines, date))
    }

    pub fn record_sale(&mut self, sale: SaleRecord) {
        info!(
            customer = sale.customer_id(),
            units = sale.units(),
            amount = %sale.amount(),
            "sale recorded"
        );
        self.sales.push(sale);
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn sales_for_customer(&self, id: &str) -> Vec<&SaleRecord> {
        self.sales.iter().filter(|s| s.belongs_to(id)).collect()
    }

    pub fn total_revenue(&self) -> Money {
        self.sales.iter().map(SaleRecord::amount).sum()
    }

    /// Ledger pre-filled with a handful of customers and motorcycles.
    pub fn demo() -> Self {
        let mut ledger = Self::new();
        let customers = [
            ("Ana López", "12345678A", "600111222", "ana@correofalso.com"),
            ("Carlos Ruiz", "98765432B", "600333444", "carlos@correofalso.com"),
            ("María Torres", "11223344C", "600555666", "maria@correofalso.com"),
            ("Javier Gómez", "55667788D", "600777888", "javier@correofalso.com"),
            ("Lucía Martín", "33445566E", "600999000", "lucia@correofalso.com"),
        ];
        for (name, id, phone, email) in customers {
            ledger.customers.push(Customer::new(name, id, phone, email));
        }
        let items = [
            ("Honda", "CL500", 679000, 3),
            ("Yamaha", "XSR700 XTribute", 879900, 2),
            ("Ducati", "Scrambler Icon", 999000, 2),
            ("Ducati", "Scrambler Full Throttle", 1199000, 1),
            ("Triumph", "Scrambler 900", 1099500, 2),
            ("Triumph", "Scrambler 1200 XC", 1499500, 1),
            ("Fantic", "Caballero 500 Scrambler", 739000, 3),
            ("Benelli", "Leoncino 500 Trail", 619000, 4),
            ("Husqvarna", "Svartpilen 401", 589900, 5),
            ("Royal Enfield", "Scram 411", 549000, 6),
        ];
        for (brand, model, cents, stock) in items {
            ledger
                .items
                .push(CatalogItem::new(brand, model, Money::from_cents(cents), stock));
        }
        ledger
    }
}

/// Units requested per slot.
fn aggregate(request: &[ItemId]) -> BTreeMap<ItemId, u32> {
    let mut wanted = BTreeMap::new();
    for &id in request {
        let count: &mut u32 = wanted.entry(id).or_default();
        *count = count.saturating_add(1);
    }
    wanted
}
