use derive_new::new;

use crate::model::id::MemberId;

use super::NotificationType;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CreateNotification {
    pub member_id: MemberId,
    pub notification_type: NotificationType,
    pub target_id: i64,
    pub message: String,
}
