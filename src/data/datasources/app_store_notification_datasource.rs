use crate::{
    data::models::app_store_server_notifications_v1::notification_payload_model::NotificationPayloadModel,
    errors::IapError,
};

pub(crate) trait AppStoreNotificationDatasource: Send + Sync {
    /// Parse App Store Server Notification (version 1):
    /// https://developer.apple.com/documentation/appstoreservernotifications/responsebodyv1
    ///
    /// notification:
    ///   The raw POST body of the notification.
    fn parse_notification(&self, notification: &str)
        -> Result<NotificationPayloadModel, IapError>;
}

pub(crate) struct AppStoreNotificationDatasourceImpl;

impl AppStoreNotificationDatasource for AppStoreNotificationDatasourceImpl {
    fn parse_notification(
        &self,
        notification: &str,
    ) -> Result<NotificationPayloadModel, IapError> {
        let payload: NotificationPayloadModel = serde_json::from_str(notification)
            .map_err(|e| IapError::NotificationParseError(format!("Invalid JSON; {}", e)))?;
        match payload.notification_type.as_deref() {
            Some(t) if !t.is_empty() => Ok(payload),
            _ => Err(IapError::NotificationParseError(
                "Missing notification_type.".to_string(),
            )),
        }
    }
}

impl AppStoreNotificationDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}
