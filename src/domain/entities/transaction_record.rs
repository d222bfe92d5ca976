use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single purchase or renewal event taken from a receipt's
/// `latest_receipt_info` or `in_app` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier of this purchase or renewal.
    pub transaction_id: String,
    /// Identifier of the first purchase in a subscription lineage. Equal to
    /// `transaction_id` for the initial purchase.
    pub original_transaction_id: String,
    pub product_id: String,
    pub quantity: Option<i64>,
    pub purchase_date_ms: Option<i64>,
    /// Expiry in epoch milliseconds. `None` for products that never expire
    /// (consumables, non-consumables).
    pub expires_date_ms: Option<i64>,
    /// Set when Apple customer support refunded the transaction.
    pub cancellation_date_ms: Option<i64>,
    pub auto_renew_status: Option<bool>,
    pub is_trial_period: Option<bool>,
    /// Every other field Apple sent, untouched.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TransactionRecord {
    /// Whether the record grants access at `now_ms`. Records without an
    /// expiry never lapse.
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        match self.expires_date_ms {
            Some(expires) => expires > now_ms,
            None => true,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_date_ms.is_some()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_date_ms.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        self.purchase_date_ms.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::TransactionRecord;

    pub(crate) fn record(transaction_id: &str, expires_date_ms: Option<i64>) -> TransactionRecord {
        TransactionRecord {
            transaction_id: transaction_id.to_string(),
            original_transaction_id: transaction_id.to_string(),
            product_id: "com.example.premium".to_string(),
            quantity: Some(1),
            purchase_date_ms: Some(1_600_000_000_000),
            expires_date_ms,
            cancellation_date_ms: None,
            auto_renew_status: None,
            is_trial_period: Some(false),
            extra: Default::default(),
        }
    }
}
