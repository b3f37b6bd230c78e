//! Fraud evaluation engine
//!
//! This module implements the two order heuristics and the submission
//! combinator that decides which of them produces the fraud signal.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use statrs::statistics::Statistics;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, MissingHistoryPolicy};
use crate::error::{FraudError, FraudResult};
use crate::history::OrderHistory;
use crate::order::{CustomerId, OrderId, OrderRecord};
use crate::{FraudAssessment, SignalSource};

/// Fraud evaluation engine
///
/// The FraudEngine owns the order ledger. Submissions hold the write lock
/// for the whole check-score-append step, so two concurrent submissions
/// never score against the same ledger state. Read-only queries share the
/// read lock.
pub struct FraudEngine {
    config: EngineConfig,
    history: RwLock<OrderHistory>,
}

impl FraudEngine {
    /// Create a new FraudEngine with an empty ledger
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            history: RwLock::new(OrderHistory::new()),
        }
    }

    /// Rebuild an engine from a previously persisted ledger
    ///
    /// Records are appended in iteration order without scoring. A record
    /// whose id is already present is skipped.
    pub fn from_records<I>(config: EngineConfig, records: I) -> Self
    where
        I: IntoIterator<Item = OrderRecord>,
    {
        let mut history = OrderHistory::new();
        for record in records {
            if history.contains(record.id) {
                debug!(
                    "Skipping duplicate order while restoring ledger: {}",
                    record.id
                );
                continue;
            }
            history.append(record);
        }
        info!("Restored order ledger with {} orders", history.len());

        Self {
            config,
            history: RwLock::new(history),
        }
    }

    /// Load configuration from YAML string
    ///
    /// # Example
    ///
    /// ```
    /// use ag_fraud::FraudEngine;
    ///
    /// let yaml = r#"
    /// missing_customer_history: zero
    /// "#;
    ///
    /// let engine = FraudEngine::from_yaml(yaml).unwrap();
    /// assert_eq!(engine.history_len(), 0);
    /// ```
    pub fn from_yaml(yaml: &str) -> FraudResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)
            .map_err(|e| FraudError::ConfigError(format!("Failed to parse YAML: {}", e)))?;
        Ok(Self::new(config))
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> FraudResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| FraudError::ConfigError(format!("Failed to parse JSON: {}", e)))?;
        Ok(Self::new(config))
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Average order quantity of a customer
    ///
    /// Returns 0 while the ledger is empty. Once the ledger holds any order,
    /// a customer without orders of their own has no average and the call
    /// fails with [`FraudError::InsufficientHistory`], unless the engine is
    /// configured with [`MissingHistoryPolicy::Zero`].
    pub fn average_quantity_for_customer(&self, customer_id: CustomerId) -> FraudResult<f64> {
        let history = self.read_history();
        average_quantity(&history, customer_id, self.config.missing_customer_history)
    }

    /// Common difference of the quantities ordered at a price
    ///
    /// Looks at every order at `price`, across all customers, in insertion
    /// order. Returns the step when the quantities form an exact arithmetic
    /// progression of at least two terms, otherwise 0.
    pub fn quantity_pattern_for_price(&self, price: i64) -> i64 {
        let history = self.read_history();
        quantity_pattern(&history, price)
    }

    /// Amount by which an order exceeds its customer's average quantity
    ///
    /// Evaluated against the ledger as it stands; the record is not appended.
    pub fn customer_deviation(&self, record: &OrderRecord) -> FraudResult<f64> {
        let history = self.read_history();
        customer_deviation(&history, record, self.config.missing_customer_history)
    }

    /// Record an order and return its fraud signal
    ///
    /// # Example
    ///
    /// ```
    /// use ag_fraud::{EngineConfig, FraudEngine, OrderRecord};
    ///
    /// let engine = FraudEngine::new(EngineConfig::default());
    /// engine.submit_and_score(OrderRecord::new(0, 1, 4, 2)).unwrap();
    ///
    /// let signal = engine.submit_and_score(OrderRecord::new(1, 1, 8, 6)).unwrap();
    /// assert_eq!(signal, 4.0); // 6 exceeds the average of 2 by 4
    /// ```
    pub fn submit_and_score(&self, record: OrderRecord) -> FraudResult<f64> {
        self.submit(record).map(|assessment| assessment.signal)
    }

    /// Record an order and report which heuristic produced its signal
    ///
    /// A duplicate id is absorbed without touching the ledger. Otherwise the
    /// customer deviation is tried first and the price pattern only when the
    /// deviation is zero; both are scored against the ledger before the
    /// record is appended. An insufficient-history fault leaves the ledger
    /// unchanged.
    pub fn submit(&self, record: OrderRecord) -> FraudResult<FraudAssessment> {
        let mut history = self.write_history();
        debug!("Submitting {}", record);

        if history.contains(record.id) {
            debug!("Duplicate order submission ignored: {}", record.id);
            return Ok(FraudAssessment::duplicate());
        }

        let deviation = customer_deviation(&history, &record, self.config.missing_customer_history)
            .inspect_err(|e| warn!("Order {} not scored: {}", record.id, e))?;

        let assessment = if deviation != 0.0 {
            FraudAssessment::new(deviation, SignalSource::CustomerDeviation)
        } else {
            let pattern = quantity_pattern(&history, record.price);
            debug!("Quantity pattern at price {}: {}", record.price, pattern);
            if pattern != 0 {
                FraudAssessment::new(pattern as f64, SignalSource::PricePattern)
            } else {
                FraudAssessment::clean()
            }
        };

        history.append(record);

        if assessment.is_flagged() && self.config.log_signals {
            info!(
                "Fraud signal {} ({:?}) for order {} from customer {}",
                assessment.signal, assessment.source, record.id, record.customer_id
            );
        }

        Ok(assessment)
    }

    /// Check whether an order id has been recorded
    pub fn contains(&self, id: OrderId) -> bool {
        self.read_history().contains(id)
    }

    /// Number of recorded orders
    pub fn history_len(&self) -> usize {
        self.read_history().len()
    }

    /// Copy of the ledger in insertion order
    pub fn snapshot(&self) -> Vec<OrderRecord> {
        self.read_history().iter().copied().collect()
    }

    // The ledger is only mutated by a single push after scoring, so a panic
    // in another holder never leaves it half-written.
    fn read_history(&self) -> RwLockReadGuard<'_, OrderHistory> {
        self.history.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_history(&self) -> RwLockWriteGuard<'_, OrderHistory> {
        self.history.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FraudEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn average_quantity(
    history: &OrderHistory,
    customer_id: CustomerId,
    policy: MissingHistoryPolicy,
) -> FraudResult<f64> {
    if history.is_empty() {
        return Ok(0.0);
    }

    let orders = history.orders_for_customer(customer_id);
    if orders.clone().next().is_none() {
        return match policy {
            MissingHistoryPolicy::Fault => Err(FraudError::InsufficientHistory { customer_id }),
            MissingHistoryPolicy::Zero => Ok(0.0),
        };
    }

    Ok(orders.map(|o| o.quantity as f64).mean())
}

fn quantity_pattern(history: &OrderHistory, price: i64) -> i64 {
    let mut quantities = history.orders_for_price(price).map(|o| o.quantity);

    let (Some(first), Some(mut previous)) = (quantities.next(), quantities.next()) else {
        return 0;
    };
    let Some(step) = previous.checked_sub(first) else {
        return 0;
    };

    for quantity in quantities {
        if quantity.checked_sub(previous) != Some(step) {
            return 0;
        }
        previous = quantity;
    }

    step
}

fn customer_deviation(
    history: &OrderHistory,
    record: &OrderRecord,
    policy: MissingHistoryPolicy,
) -> FraudResult<f64> {
    let average = average_quantity(history, record.customer_id, policy)?;
    Ok((record.quantity as f64 - average).max(0.0))
}
