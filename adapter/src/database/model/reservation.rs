use chrono::{DateTime, Utc};
use kernel::model::{
    id::{MemberId, PostId, ReservationId},
    reservation::{DeliveryMethod, Reservation, ReservationStatus, ReturnReminderTarget},
};
use shared::error::AppError;

use super::parse_column;

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub status: String,
    pub receive_method: String,
    pub receive_address1: Option<String>,
    pub receive_address2: Option<String>,
    pub return_method: String,
    pub reservation_start_at: DateTime<Utc>,
    pub reservation_end_at: DateTime<Utc>,
    pub member_id: MemberId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            status,
            receive_method,
            receive_address1,
            receive_address2,
            return_method,
            reservation_start_at,
            reservation_end_at,
            member_id,
            post_id,
            created_at,
            modified_at,
        } = value;
        Ok(Reservation {
            id: reservation_id,
            status: parse_column::<ReservationStatus>("status", &status)?,
            receive_method: parse_column::<DeliveryMethod>("receive_method", &receive_method)?,
            receive_address1,
            receive_address2,
            return_method: parse_column::<DeliveryMethod>("return_method", &return_method)?,
            reservation_start_at,
            reservation_end_at,
            reserved_by: member_id,
            post_id,
            created_at,
            modified_at,
        })
    }
}

// ページネーション用。総件数をウィンドウ関数で同時に取得する
#[derive(sqlx::FromRow)]
pub struct PaginatedReservationRow {
    pub total: i64,
    #[sqlx(flatten)]
    pub reservation: ReservationRow,
}

// 返却リマインダーの対象を取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct ReturnReminderRow {
    pub reservation_id: ReservationId,
    pub member_id: MemberId,
    pub title: String,
    pub reservation_end_at: DateTime<Utc>,
}

impl From<ReturnReminderRow> for ReturnReminderTarget {
    fn from(value: ReturnReminderRow) -> Self {
        let ReturnReminderRow {
            reservation_id,
            member_id,
            title,
            reservation_end_at,
        } = value;
        ReturnReminderTarget {
            reservation_id,
            reserved_by: member_id,
            post_title: title,
            reservation_end_at,
        }
    }
}

// 状態遷移の権限確認に使う型
#[derive(sqlx::FromRow)]
pub struct ReservationStateRow {
    pub status: String,
    pub member_id: MemberId,
    pub author_id: MemberId,
}
