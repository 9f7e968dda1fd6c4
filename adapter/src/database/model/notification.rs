use chrono::{DateTime, Utc};
use kernel::model::{
    id::{MemberId, NotificationId},
    notification::{Notification, NotificationType},
};
use shared::error::AppError;

use super::parse_column;

#[derive(sqlx::FromRow)]
pub struct NotificationRow {
    pub notification_id: NotificationId,
    pub member_id: MemberId,
    pub notification_type: String,
    pub target_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(value: NotificationRow) -> Result<Self, Self::Error> {
        let NotificationRow {
            notification_id,
            member_id,
            notification_type,
            target_id,
            message,
            is_read,
            created_at,
        } = value;
        Ok(Notification {
            id: notification_id,
            member_id,
            notification_type: parse_column::<NotificationType>(
                "notification_type",
                &notification_type,
            )?,
            target_id,
            message,
            is_read,
            created_at,
        })
    }
}
