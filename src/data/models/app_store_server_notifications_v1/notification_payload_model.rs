#![allow(dead_code)]

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, VecSkipError};

use crate::data::models::verify_receipt::{
    common::{FlexibleBool, FlexibleString},
    transaction_record_model::TransactionRecordModel,
};

/// Data structure sent by version 1 App Store Server Notifications.
///
/// https://developer.apple.com/documentation/appstoreservernotifications/responsebodyv1
///
/// Only `notification_type` decides whether a notification is accepted. Every
/// other field falls back to empty when it has an unexpected shape.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct NotificationPayloadModel {
    /// The subscription event that triggered the notification.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) notification_type: Option<String>,
    /// `Sandbox` for the sandbox environment, anything else for production.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) environment: Option<String>,
    /// An object that contains information about the most recent in-app
    /// purchase transactions for the app.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) unified_receipt: Option<UnifiedReceiptModel>,
    /// The current renewal status of the auto-renewable subscription.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) auto_renew_status: Option<FlexibleBool>,
    /// The product identifier of the product that renews at the next billing
    /// period.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) auto_renew_product_id: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) original_transaction_id: Option<FlexibleString>,
    /// The bundle identifier of the app.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) bid: Option<String>,
}

/// https://developer.apple.com/documentation/appstoreservernotifications/unified_receipt
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct UnifiedReceiptModel {
    /// The latest Base64-encoded app receipt.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) latest_receipt: Option<String>,
    /// The latest 100 in-app purchase transactions of the app.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    pub(crate) latest_receipt_info: Vec<TransactionRecordModel>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub(crate) status: Option<i64>,
}
