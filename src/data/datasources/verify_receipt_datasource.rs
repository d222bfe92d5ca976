use async_trait::async_trait;

use crate::{
    data::{
        datasources::http_transport::HttpTransport,
        models::verify_receipt::{
            request_body_model::RequestBodyModel, response_body_model::ResponseBodyModel,
        },
    },
    errors::IapError,
};

#[async_trait]
pub(crate) trait VerifyReceiptDatasource: Send + Sync {
    /// Verify Receipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// endpoint:
    ///   Production or sandbox verifyReceipt URL.
    async fn verify_receipt(
        &self,
        endpoint: &str,
        request: &RequestBodyModel<'_>,
    ) -> Result<ResponseBodyModel, IapError>;
}

pub(crate) struct VerifyReceiptDatasourceImpl<T: HttpTransport> {
    transport: T,
}

#[async_trait]
impl<T: HttpTransport> VerifyReceiptDatasource for VerifyReceiptDatasourceImpl<T> {
    async fn verify_receipt(
        &self,
        endpoint: &str,
        request: &RequestBodyModel<'_>,
    ) -> Result<ResponseBodyModel, IapError> {
        let body = serde_json::to_string(request).map_err(|e| {
            IapError::TransportError(format!("Failed to encode request body; {:?}", e))
        })?;
        tracing::debug!(endpoint, "Calling verifyReceipt.");
        let response = self.transport.post(endpoint, body).await?;
        let parsed: ResponseBodyModel = serde_json::from_str(&response).map_err(|e| {
            tracing::warn!(endpoint, error = %e, "Failed to parse verifyReceipt response.");
            IapError::MalformedResponse(e.to_string())
        })?;
        tracing::debug!(
            endpoint,
            status = parsed.status,
            environment = parsed.environment.as_deref(),
            "verifyReceipt responded."
        );
        Ok(parsed)
    }
}

impl<T: HttpTransport> VerifyReceiptDatasourceImpl<T> {
    pub(crate) fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::datasources::http_transport::test_support::MockTransport;

    fn request(receipt_data: &str) -> RequestBodyModel<'_> {
        RequestBodyModel {
            receipt_data,
            password: None,
            exclude_old_transactions: false,
        }
    }

    #[tokio::test]
    async fn test_sends_encoded_body_to_endpoint() {
        let transport = Arc::new(MockTransport::replying(r#"{"status": 21002}"#));
        let datasource = VerifyReceiptDatasourceImpl::new(transport.clone());

        let response = datasource
            .verify_receipt("https://example.test/verifyReceipt", &request("a\"b"))
            .await
            .unwrap();

        assert_eq!(response.status, Some(21002));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://example.test/verifyReceipt");
        let sent: serde_json::Value = serde_json::from_str(&requests[0].1).unwrap();
        assert_eq!(sent, serde_json::json!({ "receipt-data": "a\"b" }));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let datasource = VerifyReceiptDatasourceImpl::new(MockTransport::replying("<html>"));
        let result = datasource.verify_receipt("u", &request("x")).await;
        assert!(matches!(result, Err(IapError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_missing_status_is_not_malformed() {
        let datasource = VerifyReceiptDatasourceImpl::new(MockTransport::replying("{}"));
        let response = datasource.verify_receipt("u", &request("x")).await.unwrap();
        assert_eq!(response.status, None);
    }

    #[tokio::test]
    async fn test_non_object_is_malformed() {
        let datasource = VerifyReceiptDatasourceImpl::new(MockTransport::replying(r#""ok""#));
        let result = datasource.verify_receipt("u", &request("x")).await;
        assert!(matches!(result, Err(IapError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let datasource = VerifyReceiptDatasourceImpl::new(MockTransport::with_responses([Err(
            IapError::TransportError("connection reset".to_string()),
        )]));
        let result = datasource.verify_receipt("u", &request("x")).await;
        assert_eq!(
            result.unwrap_err(),
            IapError::TransportError("connection reset".to_string())
        );
    }
}
