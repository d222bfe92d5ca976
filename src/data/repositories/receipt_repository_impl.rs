use async_trait::async_trait;

use crate::{
    data::{
        datasources::{
            http_transport::HttpTransport,
            verify_receipt_datasource::{VerifyReceiptDatasource, VerifyReceiptDatasourceImpl},
        },
        models::verify_receipt::{
            request_body_model::RequestBodyModel, response_body_model::ResponseBodyModel,
            transaction_record_model::TransactionRecordModel,
        },
    },
    domain::{
        entities::{
            entitlement_set::EntitlementSet,
            environment::Environment,
            status_code::{
                status_message, PRODUCTION_RECEIPT_ON_SANDBOX, SANDBOX_RECEIPT_ON_PRODUCTION,
            },
            transaction_record::TransactionRecord,
            verification_config::VerificationConfig,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::IapError,
};

pub(crate) struct ReceiptRepositoryImpl<A: VerifyReceiptDatasource> {
    verify_receipt_datasource: A,
}

#[async_trait]
impl<A: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<A> {
    async fn verify_receipt(
        &self,
        config: &VerificationConfig,
        receipt_data: &str,
        now_ms: i64,
    ) -> Result<EntitlementSet, IapError> {
        let request = RequestBodyModel {
            receipt_data,
            password: config.shared_secret(),
            exclude_old_transactions: config.exclude_old_transactions,
        };

        let mut environment = config.environment;
        let mut response = self
            .verify_receipt_datasource
            .verify_receipt(environment.verify_receipt_url(), &request)
            .await?;
        check_exception(&response)?;

        // The App Store asks to retry on the other endpoint when the receipt
        // belongs to the other environment. At most one hop.
        if config.sandbox_fallback && is_wrong_environment(environment, response.status) {
            environment = environment.other();
            tracing::info!(
                status = response.status,
                ?environment,
                "Receipt belongs to the other environment, retrying there."
            );
            response = self
                .verify_receipt_datasource
                .verify_receipt(environment.verify_receipt_url(), &request)
                .await?;
            check_exception(&response)?;
        }

        if let Some(status) = response.status {
            check_status(status)?;
        }

        let reported_environment = response.environment.clone();
        let entitlements = entitlements_from_response(response, now_ms);
        if entitlements.is_empty() {
            tracing::debug!(
                ?environment,
                reported_environment = reported_environment.as_deref(),
                "Receipt has no active entitlements."
            );
            return Err(IapError::NoActiveEntitlements);
        }
        Ok(entitlements)
    }
}

impl<T: HttpTransport> ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl<T>> {
    pub(crate) fn new(transport: T) -> Self {
        Self::with_datasource(VerifyReceiptDatasourceImpl::new(transport))
    }
}

impl<A: VerifyReceiptDatasource> ReceiptRepositoryImpl<A> {
    pub(crate) fn with_datasource(verify_receipt_datasource: A) -> Self {
        Self {
            verify_receipt_datasource,
        }
    }
}

fn check_exception(response: &ResponseBodyModel) -> Result<(), IapError> {
    match &response.exception {
        Some(exception) => {
            let is_retryable = response.is_retryable.as_ref().and_then(|r| r.as_bool());
            tracing::warn!(
                status = response.status,
                exception = %exception,
                ?is_retryable,
                "App Store raised an exception."
            );
            Err(IapError::VendorException {
                message: exception.clone(),
                is_retryable,
            })
        }
        None => Ok(()),
    }
}

/// `0` and every documented error code reject the receipt. Other codes, and a
/// missing status, are passed through to entitlement extraction.
fn check_status(status: i64) -> Result<(), IapError> {
    let message = status_message(status);
    if status == 0 || message.is_some() {
        tracing::warn!(status, reason = message, "Receipt rejected.");
        return Err(IapError::InvalidReceipt {
            code: status,
            message: message.map(str::to_owned),
        });
    }
    Ok(())
}

fn is_wrong_environment(environment: Environment, status: Option<i64>) -> bool {
    match environment {
        Environment::Production => status == Some(SANDBOX_RECEIPT_ON_PRODUCTION),
        Environment::Sandbox => status == Some(PRODUCTION_RECEIPT_ON_SANDBOX),
    }
}

/// Subscription data (`receipt.latest_receipt_info`, then the top-level
/// `latest_receipt_info`) takes priority over `receipt.in_app`.
fn entitlements_from_response(response: ResponseBodyModel, now_ms: i64) -> EntitlementSet {
    let (nested_latest, in_app) = match response.receipt {
        Some(receipt) => (
            receipt.latest_receipt_info.unwrap_or_default(),
            receipt.in_app.unwrap_or_default(),
        ),
        None => (Vec::new(), Vec::new()),
    };
    let subscriptions: Vec<TransactionRecord> = nested_latest
        .into_iter()
        .chain(response.latest_receipt_info.unwrap_or_default())
        .map(TransactionRecord::from_verify_receipt_model)
        .collect();
    let purchases: Vec<TransactionRecord> = in_app
        .into_iter()
        .map(TransactionRecord::from_verify_receipt_model)
        .collect();
    EntitlementSet::merge(&subscriptions, &purchases, now_ms)
}

impl TransactionRecord {
    pub(crate) fn from_verify_receipt_model(m: TransactionRecordModel) -> Self {
        TransactionRecord {
            original_transaction_id: m
                .original_transaction_id
                .unwrap_or_else(|| m.transaction_id.clone()),
            transaction_id: m.transaction_id,
            product_id: m.product_id.unwrap_or_default(),
            quantity: m.quantity,
            purchase_date_ms: m.purchase_date_ms,
            // Zero is how non-expiring products sometimes report "no expiry".
            expires_date_ms: m.expires_date_ms.filter(|&ms| ms != 0),
            cancellation_date_ms: m.cancellation_date_ms,
            auto_renew_status: m.auto_renew_status.and_then(|b| b.as_bool()),
            is_trial_period: m.is_trial_period.and_then(|b| b.as_bool()),
            extra: m.extra,
        }
    }
}
