//! # ag-fraud: Order Fraud Heuristics
//!
//! This library scores purchase orders against an append-only order ledger
//! and returns a fraud signal for every newly submitted order.
//!
//! ## Core Components
//!
//! - **OrderRecord**: One purchase event, identified by its id alone
//! - **OrderHistory**: Insertion-ordered ledger with filtered traversal
//! - **FraudEngine**: Customer deviation and price pattern heuristics
//!
//! ## Heuristics
//!
//! An order is first compared with its customer's average quantity. Only
//! when it does not exceed that average is the price pattern consulted: the
//! quantities ordered at the same price, by any customer, and whether they
//! form an exact arithmetic progression.
//!
//! ## Example Usage
//!
//! ```rust
//! use ag_fraud::{FraudEngine, OrderRecord, SignalSource};
//!
//! let engine = FraudEngine::from_yaml("missing_customer_history: fault").unwrap();
//!
//! engine.submit(OrderRecord::new(0, 1, 4, 8)).unwrap();
//! engine.submit(OrderRecord::new(1, 1, 4, 14)).unwrap();
//!
//! // Below the customer's average of 11, but the quantities at price 4
//! // grow by 6 per order
//! let assessment = engine.submit(OrderRecord::new(2, 1, 4, 2)).unwrap();
//! assert_eq!(assessment.signal, 6.0);
//! assert_eq!(assessment.source, SignalSource::PricePattern);
//! ```

mod config;
mod engine;
mod error;
mod history;
mod order;

pub use config::{EngineConfig, MissingHistoryPolicy};
pub use engine::FraudEngine;
pub use error::{FraudError, FraudResult};
pub use order::{CustomerId, OrderId, OrderRecord};

use serde::{Deserialize, Serialize};

/// Heuristic that produced a fraud signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalSource {
    /// The order id was already recorded; nothing was scored
    Duplicate,

    /// Quantity exceeded the customer's historical average
    CustomerDeviation,

    /// Quantities at the order's price form an arithmetic progression
    PricePattern,

    /// Neither heuristic fired
    Clean,
}

/// Result of scoring a submitted order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Fraud signal; 0 means no anomaly
    pub signal: f64,

    /// Heuristic responsible for the signal
    pub source: SignalSource,
}

impl FraudAssessment {
    /// Create an assessment with a signal from the given heuristic
    pub fn new(signal: f64, source: SignalSource) -> Self {
        Self { signal, source }
    }

    /// Assessment for an order that triggered no heuristic
    pub fn clean() -> Self {
        Self::new(0.0, SignalSource::Clean)
    }

    /// Assessment for a resubmitted order id
    pub fn duplicate() -> Self {
        Self::new(0.0, SignalSource::Duplicate)
    }

    /// Whether the signal reports an anomaly
    pub fn is_flagged(&self) -> bool {
        self.signal != 0.0
    }
}
