use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    data::{
        datasources::{
            app_store_notification_datasource::AppStoreNotificationDatasourceImpl,
            http_transport::{HttpTransport, ReqwestTransport},
            verify_receipt_datasource::VerifyReceiptDatasourceImpl,
        },
        repositories::{
            notification_repository_impl::NotificationRepositoryImpl,
            receipt_repository_impl::ReceiptRepositoryImpl,
        },
    },
    domain::{
        entities::{
            entitlement_set::EntitlementSet,
            server_notification::{NotificationType, ServerNotification},
            verification_config::VerificationConfig,
        },
        repositories::{
            notification_repository::NotificationRepository, receipt_repository::ReceiptRepository,
        },
    },
    errors::IapError,
};

/// Verifies App Store receipts through the legacy verifyReceipt endpoint.
///
/// Configuration can be changed between calls. Each `verify` issues one
/// request (two when sandbox fallback kicks in) and keeps no state besides
/// the last error message.
pub struct ReceiptVerifier<R: ReceiptRepository> {
    receipt_repository: R,
    config: VerificationConfig,
    last_error: Mutex<Option<String>>,
}

impl<R: ReceiptRepository> ReceiptVerifier<R> {
    pub fn with_repository(receipt_repository: R, config: VerificationConfig) -> Self {
        Self {
            receipt_repository,
            config,
            last_error: Mutex::new(None),
        }
    }

    /// Production endpoint unless `use_sandbox`.
    pub fn set_endpoint(&mut self, use_sandbox: bool) -> &mut Self {
        self.config.set_sandbox(use_sandbox);
        self
    }

    pub fn set_shared_secret(&mut self, secret: impl Into<String>) -> &mut Self {
        self.config.set_shared_secret(secret);
        self
    }

    pub fn clear_shared_secret(&mut self) -> &mut Self {
        self.config.clear_shared_secret();
        self
    }

    pub fn set_sandbox_fallback(&mut self, enabled: bool) -> &mut Self {
        self.config.sandbox_fallback = enabled;
        self
    }

    pub fn set_exclude_old_transactions(&mut self, enabled: bool) -> &mut Self {
        self.config.exclude_old_transactions = enabled;
        self
    }

    pub fn endpoint(&self) -> &'static str {
        self.config.endpoint()
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Verifies `receipt_data` and returns the entitlements active right now.
    pub async fn verify(&self, receipt_data: &str) -> Result<EntitlementSet, IapError> {
        self.verify_at(receipt_data, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Same as `verify`, with "now" given in epoch milliseconds.
    pub async fn verify_at(
        &self,
        receipt_data: &str,
        now_ms: i64,
    ) -> Result<EntitlementSet, IapError> {
        let result = self
            .receipt_repository
            .verify_receipt(&self.config, receipt_data, now_ms)
            .await;
        *self.last_error_slot() = result.as_ref().err().map(|e| e.to_string());
        result
    }

    /// Message of the error returned by the most recent `verify` call, if it
    /// failed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error_slot().clone()
    }

    fn last_error_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: HttpTransport>
    ReceiptVerifier<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl<T>>>
{
    pub fn with_transport(transport: T, config: VerificationConfig) -> Self {
        Self::with_repository(ReceiptRepositoryImpl::new(transport), config)
    }
}

impl ReceiptVerifier<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl<ReqwestTransport>>> {
    pub fn new(config: VerificationConfig) -> Result<Self, IapError> {
        let transport = ReqwestTransport::new(config.connect_timeout, config.timeout)?;
        Ok(Self::with_transport(transport, config))
    }
}

/// Business callback for one notification type.
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    async fn handle(&self, notification: &ServerNotification) -> Result<(), IapError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler processed the notification.
    Handled,
    /// Unrecognized type, or no handler registered for it.
    Ignored,
}

/// Response to send back to the App Store for a notification POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: StatusCode,
    pub body: String,
}

impl WebhookReply {
    fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: "{}".to_string(),
        }
    }
}

/// Routes version 1 App Store server notifications to handlers by
/// `notification_type`.
pub struct NotificationClassifier<N: NotificationRepository> {
    notification_repository: N,
    handlers: HashMap<NotificationType, Box<dyn NotificationHandler>>,
}

impl NotificationClassifier<NotificationRepositoryImpl<AppStoreNotificationDatasourceImpl>> {
    pub fn new() -> Self {
        Self::with_repository(NotificationRepositoryImpl::new())
    }
}

impl Default
    for NotificationClassifier<NotificationRepositoryImpl<AppStoreNotificationDatasourceImpl>>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NotificationRepository> NotificationClassifier<N> {
    pub fn with_repository(notification_repository: N) -> Self {
        Self {
            notification_repository,
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for a recognized notification type, replacing any
    /// previous one.
    pub fn register(
        &mut self,
        notification_type: NotificationType,
        handler: impl NotificationHandler + 'static,
    ) -> Result<&mut Self, IapError> {
        if !notification_type.is_recognized() {
            return Err(IapError::Configuration(format!(
                "Cannot register a handler for unrecognized notification type {:?}.",
                notification_type
            )));
        }
        self.handlers.insert(notification_type, Box::new(handler));
        Ok(self)
    }

    pub fn parse(&self, body: &str) -> Result<ServerNotification, IapError> {
        self.notification_repository.parse_notification(body)
    }

    pub async fn dispatch(
        &self,
        notification: &ServerNotification,
    ) -> Result<DispatchOutcome, IapError> {
        let handler = match &notification.notification_type {
            NotificationType::Unknown(_) => None,
            known => self.handlers.get(known),
        };
        match handler {
            Some(handler) => {
                handler.handle(notification).await?;
                Ok(DispatchOutcome::Handled)
            }
            None => {
                tracing::debug!(
                    notification_type = ?notification.notification_type,
                    "No handler for notification, ignoring."
                );
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    /// Parses and dispatches a raw notification body.
    pub async fn dispatch_body(&self, body: &str) -> Result<DispatchOutcome, IapError> {
        let notification = self.parse(body)?;
        self.dispatch(&notification).await
    }

    /// Webhook entry point: `406 {}` when the body is rejected, `200 {}` once
    /// dispatched, `500 {}` when the handler failed so the App Store
    /// redelivers.
    pub async fn handle_webhook(&self, body: &str) -> WebhookReply {
        let notification = match self.parse(body) {
            Ok(notification) => notification,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected App Store notification.");
                return WebhookReply::empty(StatusCode::NOT_ACCEPTABLE);
            }
        };
        match self.dispatch(&notification).await {
            Ok(_) => WebhookReply::empty(StatusCode::OK),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    notification_type = ?notification.notification_type,
                    "Notification handler failed."
                );
                WebhookReply::empty(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
