use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::errors::IapError;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const JSON: &str = "application/json";

/// "Send a POST, get the response body" capability used to reach the
/// verifyReceipt endpoint.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs `body` to `url` and returns the raw response body. Network
    /// failures, timeouts and non-2xx responses are `TransportError`s.
    async fn post(&self, url: &str, body: String) -> Result<String, IapError>;
}

/// reqwest-backed transport. TLS certificates and host names are always
/// verified (rustls).
pub struct ReqwestTransport {
    client: reqwest::Client,
    content_type: &'static str,
}

impl ReqwestTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self, IapError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .https_only(true)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                IapError::Configuration(format!("Failed to build HTTP client; {:?}", e))
            })?;
        Ok(Self {
            client,
            content_type: FORM_URLENCODED,
        })
    }

    /// Sends `Content-Type: application/json` instead of the form-encoded
    /// default. The App Store accepts both.
    pub fn with_json_content_type(mut self) -> Self {
        self.content_type = JSON;
        self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, IapError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, self.content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IapError::TransportError(format!("Callout timed out; {}", url))
                } else {
                    IapError::TransportError(format!("Callout failed to send; {:?}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(IapError::TransportError(format!(
                "Callout returned with non-200 status code; {}; {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response.text().await.map_err(|e| {
            IapError::TransportError(format!("Failed to read callout response; {:?}", e))
        })
    }
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn post(&self, url: &str, body: String) -> Result<String, IapError> {
        (**self).post(url, body).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_transport() {
        let transport =
            ReqwestTransport::new(Duration::from_secs(10), Duration::from_secs(10)).unwrap();
        assert_eq!(transport.content_type, FORM_URLENCODED);
        assert_eq!(transport.with_json_content_type().content_type, JSON);
    }
}
