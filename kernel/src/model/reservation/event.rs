use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::{MemberId, PostId, ReservationId};

use super::{DeliveryMethod, ReservationStatus};

#[derive(Debug, new)]
pub struct CreateReservation {
    pub post_id: PostId,
    pub reserved_by: MemberId,
    pub receive_method: DeliveryMethod,
    pub receive_address1: Option<String>,
    pub receive_address2: Option<String>,
    pub return_method: DeliveryMethod,
    pub reservation_start_at: DateTime<Utc>,
    pub reservation_end_at: DateTime<Utc>,
}

#[derive(Debug, new)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub requested_by: MemberId,
    pub status: ReservationStatus,
}
