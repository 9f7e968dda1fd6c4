use chrono::{DateTime, Utc};
use kernel::model::{
    id::NotificationId,
    notification::{Notification, NotificationType},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub notification_type: NotificationType,
    pub target_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        let Notification {
            id,
            notification_type,
            target_id,
            message,
            is_read,
            created_at,
            ..
        } = value;
        Self {
            id,
            notification_type,
            target_id,
            message,
            is_read,
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub items: Vec<NotificationResponse>,
}

impl From<Vec<Notification>> for NotificationsResponse {
    fn from(value: Vec<Notification>) -> Self {
        Self {
            items: value.into_iter().map(NotificationResponse::from).collect(),
        }
    }
}
