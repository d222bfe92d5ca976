use crate::{
    data::{
        datasources::app_store_notification_datasource::{
            AppStoreNotificationDatasource, AppStoreNotificationDatasourceImpl,
        },
        models::app_store_server_notifications_v1::notification_payload_model::NotificationPayloadModel,
    },
    domain::{
        entities::{
            environment::Environment,
            server_notification::{NotificationType, ServerNotification},
            transaction_record::TransactionRecord,
        },
        repositories::notification_repository::NotificationRepository,
    },
    errors::IapError,
};

pub(crate) struct NotificationRepositoryImpl<B: AppStoreNotificationDatasource> {
    app_store_notification_datasource: B,
}

impl<B: AppStoreNotificationDatasource> NotificationRepository for NotificationRepositoryImpl<B> {
    fn parse_notification(&self, body: &str) -> Result<ServerNotification, IapError> {
        let payload = self
            .app_store_notification_datasource
            .parse_notification(body)?;
        Ok(ServerNotification::from_payload_model(payload))
    }
}

impl NotificationRepositoryImpl<AppStoreNotificationDatasourceImpl> {
    pub(crate) fn new() -> Self {
        Self {
            app_store_notification_datasource: AppStoreNotificationDatasourceImpl::new(),
        }
    }
}

impl ServerNotification {
    fn from_payload_model(m: NotificationPayloadModel) -> Self {
        let (latest_receipt, latest_receipt_info) = match m.unified_receipt {
            Some(unified) => (
                unified.latest_receipt,
                unified
                    .latest_receipt_info
                    .into_iter()
                    .map(TransactionRecord::from_verify_receipt_model)
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        ServerNotification {
            notification_type: NotificationType::from_wire(
                m.notification_type.as_deref().unwrap_or_default(),
            ),
            environment: Environment::from_wire(m.environment.as_deref().unwrap_or_default()),
            latest_receipt,
            latest_receipt_info,
            auto_renew_status: m.auto_renew_status.and_then(|b| b.as_bool()),
            auto_renew_product_id: m.auto_renew_product_id,
            original_transaction_id: m.original_transaction_id.map(|id| id.into_string()),
            bundle_id: m.bid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cancel_notification() {
        let notification = NotificationRepositoryImpl::new()
            .parse_notification(
                r#"{
                    "notification_type": "CANCEL",
                    "environment": "Sandbox",
                    "auto_renew_status": "false",
                    "auto_renew_product_id": "com.example.monthly",
                    "bid": "com.example.app",
                    "unified_receipt": {
                        "status": 0,
                        "environment": "Sandbox",
                        "latest_receipt": "MIIT",
                        "latest_receipt_info": [{
                            "transaction_id": "1000000700000002",
                            "original_transaction_id": "1000000700000000",
                            "product_id": "com.example.monthly",
                            "cancellation_date_ms": "1602000000000",
                            "expires_date_ms": "1602592000000"
                        }]
                    }
                }"#,
            )
            .unwrap();

        assert_eq!(notification.notification_type, NotificationType::Cancel);
        assert_eq!(notification.environment, Environment::Sandbox);
        assert_eq!(notification.latest_receipt.as_deref(), Some("MIIT"));
        assert_eq!(notification.auto_renew_status, Some(false));
        assert_eq!(notification.bundle_id.as_deref(), Some("com.example.app"));
        let record = &notification.latest_receipt_info[0];
        assert_eq!(record.original_transaction_id, "1000000700000000");
        assert!(record.is_cancelled());
    }

    #[test]
    fn test_parse_without_unified_receipt() {
        let notification = NotificationRepositoryImpl::new()
            .parse_notification(r#"{"notification_type": "PRICE_INCREASE_CONSENT"}"#)
            .unwrap();
        assert!(!notification.notification_type.is_recognized());
        assert_eq!(notification.environment, Environment::Production);
        assert!(notification.latest_receipt.is_none());
        assert!(notification.latest_receipt_info.is_empty());
    }
}
