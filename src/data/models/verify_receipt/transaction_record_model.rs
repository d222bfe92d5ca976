use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::common::FlexibleBool;

/// One element of the `in_app` or `latest_receipt_info` arrays.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
///
/// Numeric values are delivered as strings (`"expires_date_ms":
/// "1600000000000"`) but numbers are accepted as well.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransactionRecordModel {
    /// The unique identifier of the transaction.
    pub(crate) transaction_id: String,
    /// The transaction identifier of the original purchase.
    #[serde(default)]
    pub(crate) original_transaction_id: Option<String>,
    /// The unique identifier of the product purchased.
    #[serde(default)]
    pub(crate) product_id: Option<String>,
    /// The number of consumable products purchased.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) quantity: Option<i64>,
    /// The time the App Store charged the account, in UNIX epoch
    /// milliseconds.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) purchase_date_ms: Option<i64>,
    /// The time a subscription expires or renews, in UNIX epoch milliseconds.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) expires_date_ms: Option<i64>,
    /// The time Apple customer support cancelled the transaction, in UNIX
    /// epoch milliseconds.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) cancellation_date_ms: Option<i64>,
    #[serde(default)]
    pub(crate) auto_renew_status: Option<FlexibleBool>,
    /// Whether the transaction falls in a free trial period.
    #[serde(default)]
    pub(crate) is_trial_period: Option<FlexibleBool>,
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}
