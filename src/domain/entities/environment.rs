use serde::{Deserialize, Serialize};

use crate::constants::{VERIFY_RECEIPT_PRODUCTION_URL, VERIFY_RECEIPT_SANDBOX_URL};

/// The App Store deployment a receipt or notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Environment {
    Sandbox,
    #[default]
    Production,
}

impl Environment {
    /// Maps the `environment` string found in App Store payloads. Anything
    /// other than `"Sandbox"` is treated as production.
    pub fn from_wire(value: &str) -> Self {
        if value == "Sandbox" {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    pub fn verify_receipt_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => VERIFY_RECEIPT_SANDBOX_URL,
            Environment::Production => VERIFY_RECEIPT_PRODUCTION_URL,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Environment::Sandbox => Environment::Production,
            Environment::Production => Environment::Sandbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire() {
        assert_eq!(Environment::from_wire("Sandbox"), Environment::Sandbox);
        assert_eq!(Environment::from_wire("Production"), Environment::Production);
        assert_eq!(Environment::from_wire("PROD"), Environment::Production);
        assert_eq!(Environment::from_wire(""), Environment::Production);
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            Environment::Sandbox.verify_receipt_url(),
            "https://sandbox.itunes.apple.com/verifyReceipt"
        );
        assert_eq!(
            Environment::default().verify_receipt_url(),
            "https://buy.itunes.apple.com/verifyReceipt"
        );
        assert_eq!(Environment::Sandbox.other(), Environment::Production);
    }
}
