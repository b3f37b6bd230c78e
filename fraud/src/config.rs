//! Engine configuration
//!
//! This module defines the configuration document for the fraud engine,
//! typically loaded from YAML or JSON files.

use serde::{Deserialize, Serialize};

/// What the customer average does when the ledger has orders, but none
/// from the requested customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingHistoryPolicy {
    /// Fail with `FraudError::InsufficientHistory`
    #[default]
    Fault,

    /// Treat the customer's average as 0
    Zero,
}

/// Complete fraud engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Behaviour of the customer average for a customer with no orders
    #[serde(default)]
    pub missing_customer_history: MissingHistoryPolicy,

    /// Emit an info event for every non-zero fraud signal
    #[serde(default = "default_log_signals")]
    pub log_signals: bool,
}

fn default_log_signals() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_customer_history: MissingHistoryPolicy::Fault,
            log_signals: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization_yaml() {
        let yaml = r#"
missing_customer_history: zero
log_signals: false
"#;

        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.missing_customer_history, MissingHistoryPolicy::Zero);
        assert!(!config.log_signals);
    }

    #[test]
    fn test_config_deserialization_json() {
        let json = r#"{ "missing_customer_history": "fault" }"#;

        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.missing_customer_history, MissingHistoryPolicy::Fault);
        assert!(config.log_signals);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: EngineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_serialization_yaml() {
        let config = EngineConfig {
            missing_customer_history: MissingHistoryPolicy::Zero,
            log_signals: true,
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("missing_customer_history: zero"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let yaml = "missing_customer_history: ignore\n";
        assert!(serde_yaml::from_str::<EngineConfig>(yaml).is_err());
    }
}
