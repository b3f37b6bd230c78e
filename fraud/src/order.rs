//! Purchase order records
//!
//! An [`OrderRecord`] is identified by its id alone: two records carrying the
//! same id are the same logical order, whatever their other fields say.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Externally assigned order identifier
pub type OrderId = u64;

/// Customer identifier
pub type CustomerId = u64;

/// One purchase event
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Unique per logical order
    pub id: OrderId,

    /// Submitting customer
    pub customer_id: CustomerId,

    /// Unit price
    pub price: i64,

    /// Ordered quantity
    pub quantity: i64,
}

impl OrderRecord {
    /// Create a new order record
    pub fn new(id: OrderId, customer_id: CustomerId, price: i64, quantity: i64) -> Self {
        Self {
            id,
            customer_id,
            price,
            quantity,
        }
    }
}

impl PartialEq for OrderRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OrderRecord {}

impl Hash for OrderRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for OrderRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "order {} (customer {}, price {}, qty {})",
            self.id, self.customer_id, self.price, self.quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_compares_ids_only() {
        let order = OrderRecord::new(0, 1, 4, 2);
        let same_id = OrderRecord::new(0, 9, 100, 50);
        assert_eq!(order, same_id);

        let other = OrderRecord::new(1, 1, 4, 2);
        assert_ne!(order, other);
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let mut set = HashSet::new();
        set.insert(OrderRecord::new(0, 1, 4, 2));
        assert!(!set.insert(OrderRecord::new(0, 2, 8, 6)));
        assert!(set.insert(OrderRecord::new(1, 1, 4, 2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_order_fields() {
        let order = OrderRecord::new(1, 2, 3, 4);
        assert_eq!(order.id, 1);
        assert_eq!(order.customer_id, 2);
        assert_eq!(order.price, 3);
        assert_eq!(order.quantity, 4);
    }

    #[test]
    fn test_order_serialization() {
        let order = OrderRecord::new(5, 6, 7, 8);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"customer_id\":6"));
    }
}
