use crate::{domain::entities::server_notification::ServerNotification, errors::IapError};

pub trait NotificationRepository: Send + Sync {
    fn parse_notification(&self, body: &str) -> Result<ServerNotification, IapError>;
}
