//! Append-only order ledger

use std::collections::HashSet;

use crate::order::{CustomerId, OrderId, OrderRecord};

/// Insertion-ordered, append-only ledger of order records
///
/// The ledger itself does not reject duplicate ids; the engine checks
/// [`OrderHistory::contains`] before every append.
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: Vec<OrderRecord>,
    ids: HashSet<OrderId>,
}

impl OrderHistory {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: OrderRecord) {
        self.ids.insert(record.id);
        self.orders.push(record);
    }

    /// Check whether an order with this id has been recorded
    pub fn contains(&self, id: OrderId) -> bool {
        self.ids.contains(&id)
    }

    /// Orders placed by a customer, in insertion order
    ///
    /// The returned iterator is lazy and can be cloned to restart traversal.
    pub fn orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> impl Iterator<Item = &OrderRecord> + Clone + '_ {
        self.orders
            .iter()
            .filter(move |o| o.customer_id == customer_id)
    }

    /// Orders at a price across all customers, in insertion order
    pub fn orders_for_price(&self, price: i64) -> impl Iterator<Item = &OrderRecord> + Clone + '_ {
        self.orders.iter().filter(move |o| o.price == price)
    }

    /// All orders in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.orders.iter()
    }

    /// Number of recorded orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no order has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> OrderHistory {
        let mut history = OrderHistory::new();
        history.append(OrderRecord::new(0, 1, 4, 2));
        history.append(OrderRecord::new(1, 2, 4, 8));
        history.append(OrderRecord::new(2, 2, 5, 13));
        history.append(OrderRecord::new(3, 1, 4, 14));
        history
    }

    #[test]
    fn test_append_preserves_order() {
        let history = sample_history();
        let ids: Vec<OrderId> = history.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(history.len(), 4);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_contains_by_id() {
        let history = sample_history();
        assert!(history.contains(2));
        assert!(!history.contains(42));
    }

    #[test]
    fn test_orders_for_customer() {
        let history = sample_history();
        let quantities: Vec<i64> = history.orders_for_customer(1).map(|o| o.quantity).collect();
        assert_eq!(quantities, vec![2, 14]);
        assert_eq!(history.orders_for_customer(99).count(), 0);
    }

    #[test]
    fn test_orders_for_price_spans_customers() {
        let history = sample_history();
        let quantities: Vec<i64> = history.orders_for_price(4).map(|o| o.quantity).collect();
        assert_eq!(quantities, vec![2, 8, 14]);
    }

    #[test]
    fn test_sequences_are_restartable() {
        let history = sample_history();
        let orders = history.orders_for_price(4);
        let first_pass = orders.clone().count();
        let second_pass = orders.count();
        assert_eq!(first_pass, 3);
        assert_eq!(second_pass, 3);
    }

    #[test]
    fn test_empty_history() {
        let history = OrderHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.orders_for_customer(1).count(), 0);
        assert_eq!(history.orders_for_price(1).count(), 0);
    }
}
