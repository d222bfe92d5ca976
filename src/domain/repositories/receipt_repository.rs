use async_trait::async_trait;

use crate::{
    domain::entities::{entitlement_set::EntitlementSet, verification_config::VerificationConfig},
    errors::IapError,
};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Verifies `receipt_data` against the endpoint selected by `config` and
    /// returns the transactions that are active at `now_ms`.
    async fn verify_receipt(
        &self,
        config: &VerificationConfig,
        receipt_data: &str,
        now_ms: i64,
    ) -> Result<EntitlementSet, IapError>;
}
