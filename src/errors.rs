use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IapError {
    /// The verification endpoint answered with a body that is not valid JSON.
    #[error("Malformed verifyReceipt response: {0}")]
    MalformedResponse(String),

    /// The App Store reported an internal fault instead of a validation
    /// result (for example `MZInAppCacheAccessException`).
    #[error("App Store exception: {message}")]
    VendorException {
        message: String,
        is_retryable: Option<bool>,
    },

    /// The App Store rejected the receipt.
    #[error("Invalid receipt (status {code}): {}", .message.as_deref().unwrap_or(""))]
    InvalidReceipt { code: i64, message: Option<String> },

    /// The receipt parsed fine but none of its transactions is currently
    /// active.
    #[error("No active entitlements in receipt.")]
    NoActiveEntitlements,

    #[error("Error calling out to verifyReceipt: {0}")]
    TransportError(String),

    #[error("Failed to parse App Store server notification: {0}")]
    NotificationParseError(String),

    #[error("Notification handler failed: {0}")]
    NotificationHandlerError(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl IapError {
    /// Whether a caller may reasonably retry the same call later.
    pub fn is_retryable(&self) -> bool {
        match self {
            IapError::TransportError(_) => true,
            IapError::VendorException { is_retryable, .. } => is_retryable.unwrap_or(true),
            IapError::InvalidReceipt { code, .. } => {
                *code == 21005 || *code == 21009 || (21100..=21199).contains(code)
            }
            IapError::MalformedResponse(_)
            | IapError::NoActiveEntitlements
            | IapError::NotificationParseError(_)
            | IapError::NotificationHandlerError(_)
            | IapError::Configuration(_) => false,
        }
    }
}
