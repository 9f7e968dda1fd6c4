use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::model::id::{MemberId, PostId, ReservationId};

pub mod event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    PendingApproval,
    PendingPayment,
    PendingPickup,
    Shipping,
    Renting,
    PendingReturn,
    Returning,
    ReturnCompleted,
    Rejected,
    Cancelled,
}

// 予約の当事者。借り手 (予約者) と貸し手 (投稿者)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationActor {
    Borrower,
    Owner,
}

impl ReservationStatus {
    // 許可される状態遷移の表。遷移ごとに実行できる当事者は 1 人だけ
    pub fn transition_actor(self, next: Self) -> Option<ReservationActor> {
        use ReservationActor::*;
        use ReservationStatus::*;
        match (self, next) {
            (PendingApproval, PendingPayment)
            | (PendingApproval, Rejected)
            | (PendingPayment, PendingPickup)
            | (PendingPayment, Shipping)
            | (PendingPickup, Renting)
            | (PendingReturn, ReturnCompleted)
            | (Returning, ReturnCompleted) => Some(Owner),
            (PendingApproval, Cancelled)
            | (PendingPayment, Cancelled)
            | (Shipping, Renting)
            | (Renting, PendingReturn)
            | (Renting, Returning)
            | (PendingReturn, Returning) => Some(Borrower),
            _ => None,
        }
    }

    // 物品が借り手の手元にあり、返却リマインダーの対象になる状態
    pub fn awaiting_return() -> [Self; 2] {
        [Self::Renting, Self::PendingReturn]
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    Direct,
    Delivery,
}

#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub receive_method: DeliveryMethod,
    pub receive_address1: Option<String>,
    pub receive_address2: Option<String>,
    pub return_method: DeliveryMethod,
    pub reservation_start_at: DateTime<Utc>,
    pub reservation_end_at: DateTime<Utc>,
    pub reserved_by: MemberId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

// 返却リマインダーの送信対象となる予約の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReminderTarget {
    pub reservation_id: ReservationId,
    pub reserved_by: MemberId,
    pub post_title: String,
    pub reservation_end_at: DateTime<Utc>,
}
