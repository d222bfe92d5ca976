use serde::{Deserialize, Serialize};

use super::{environment::Environment, transaction_record::TransactionRecord};

/// Version 1 App Store server notification, decoded.
///
/// https://developer.apple.com/documentation/appstoreservernotifications/responsebodyv1
#[derive(Debug, Clone, PartialEq)]
pub struct ServerNotification {
    pub notification_type: NotificationType,
    pub environment: Environment,
    /// Latest base64-encoded receipt. Store it to re-verify the subscription
    /// status later.
    pub latest_receipt: Option<String>,
    /// Latest transactions of the subscription, including the initial
    /// purchase and renewals.
    pub latest_receipt_info: Vec<TransactionRecord>,
    pub auto_renew_status: Option<bool>,
    pub auto_renew_product_id: Option<String>,
    pub original_transaction_id: Option<String>,
    pub bundle_id: Option<String>,
}

/// https://developer.apple.com/documentation/appstoreservernotifications/notification_type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// First purchase of a subscription. `transaction_id` and
    /// `original_transaction_id` are equal in `latest_receipt_info`.
    InitialBuy,
    /// Apple customer support cancelled the subscription, or the customer
    /// upgraded it. Records carry `cancellation_date_ms`.
    Cancel,
    /// Automatic renewal of an expired subscription. Superseded by
    /// `DID_RECOVER`.
    Renewal,
    /// An expired subscription was recovered through billing retry.
    DidRecover,
    /// The customer renewed interactively, from the app or the App Store
    /// subscription settings.
    InteractiveRenewal,
    /// The renewal status changed. Check `auto_renew_status`.
    DidChangeRenewalStatus,
    /// The subscription failed to renew because of a billing issue.
    DidFailToRenew,
    /// The customer changed the plan that takes effect at the next renewal.
    DidChangeRenewalPref,
    /// AppleCare refunded a consumable, non-consumable or non-renewing
    /// subscription.
    Refund,
    /// The subscription renewed successfully for a new period.
    DidRenew,

    #[serde(untagged)]
    Unknown(String),
}

impl NotificationType {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, NotificationType::Unknown(_))
    }

    pub fn from_wire(value: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(value.to_owned()))
            .unwrap_or_else(|_| NotificationType::Unknown(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("INITIAL_BUY", NotificationType::InitialBuy)]
    #[case("CANCEL", NotificationType::Cancel)]
    #[case("RENEWAL", NotificationType::Renewal)]
    #[case("DID_RECOVER", NotificationType::DidRecover)]
    #[case("INTERACTIVE_RENEWAL", NotificationType::InteractiveRenewal)]
    #[case("DID_CHANGE_RENEWAL_STATUS", NotificationType::DidChangeRenewalStatus)]
    #[case("DID_FAIL_TO_RENEW", NotificationType::DidFailToRenew)]
    #[case("DID_CHANGE_RENEWAL_PREF", NotificationType::DidChangeRenewalPref)]
    #[case("REFUND", NotificationType::Refund)]
    #[case("DID_RENEW", NotificationType::DidRenew)]
    fn test_recognized_types(#[case] wire: &str, #[case] expected: NotificationType) {
        let parsed = NotificationType::from_wire(wire);
        assert_eq!(parsed, expected);
        assert!(parsed.is_recognized());
    }

    #[test]
    fn test_unknown_type() {
        let parsed = NotificationType::from_wire("PRICE_INCREASE_CONSENT");
        assert_eq!(
            parsed,
            NotificationType::Unknown("PRICE_INCREASE_CONSENT".to_string())
        );
        assert!(!parsed.is_recognized());
    }
}
