#![allow(dead_code)]

use serde::Deserialize;
use serde_with::{serde_as, VecSkipError};

use super::{common::FlexibleBool, transaction_record_model::TransactionRecordModel};

/// JSON body returned by the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Whether fields are present depends on the status and on the receipt type,
/// so everything is optional. Transaction elements that do not parse are
/// skipped.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseBodyModel {
    /// Either 0 or one of the documented error codes. Can be missing next to
    /// an `exception`.
    #[serde(default)]
    pub(crate) status: Option<i64>,
    /// The environment for which the receipt was generated.
    #[serde(default)]
    pub(crate) environment: Option<String>,
    /// Present when the App Store hit an internal fault, for example
    /// `com.apple.jingle.commercelogic.inappcache.MZInAppCacheAccessException`.
    #[serde(default)]
    pub(crate) exception: Option<String>,
    /// Whether an error occurred during the request and it may be retried.
    #[serde(default, rename = "is-retryable", alias = "is_retryable")]
    pub(crate) is_retryable: Option<FlexibleBool>,
    /// The decoded receipt.
    #[serde(default)]
    pub(crate) receipt: Option<ReceiptModel>,
    /// The latest Base64-encoded app receipt. Only returned for receipts
    /// that contain auto-renewable subscriptions.
    #[serde(default)]
    pub(crate) latest_receipt: Option<String>,
    /// All subscription transactions, including renewals. Only returned for
    /// receipts that contain auto-renewable subscriptions.
    #[serde_as(as = "Option<VecSkipError<_>>")]
    pub(crate) latest_receipt_info: Option<Vec<TransactionRecordModel>>,
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptModel {
    #[serde(default)]
    pub(crate) bundle_id: Option<String>,
    #[serde_as(as = "Option<VecSkipError<_>>")]
    pub(crate) latest_receipt_info: Option<Vec<TransactionRecordModel>>,
    /// In-app purchase receipt fields for all in-app purchase transactions.
    #[serde_as(as = "Option<VecSkipError<_>>")]
    pub(crate) in_app: Option<Vec<TransactionRecordModel>>,
}
