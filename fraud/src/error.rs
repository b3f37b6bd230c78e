//! Error types for the fraud engine

use thiserror::Error;

use crate::order::CustomerId;

/// Result type for fraud engine operations
pub type FraudResult<T> = Result<T, FraudError>;

/// Fraud engine error types
#[derive(Debug, Error)]
pub enum FraudError {
    /// The ledger holds orders, but none for this customer, so no average exists
    #[error("Insufficient order history for customer {customer_id}")]
    InsufficientHistory {
        /// Customer whose average was requested
        customer_id: CustomerId,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FraudError {
    /// Check if error is the customer-average fault
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, FraudError::InsufficientHistory { .. })
    }
}
