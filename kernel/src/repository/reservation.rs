use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::error::AppResult;

use crate::model::{
    id::MemberId,
    list::{ListOptions, PaginatedList},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation, ReturnReminderTarget,
    },
};

#[mockall::automock]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を PENDING_APPROVAL で登録する
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    // メンバーが送った予約の一覧を取得する
    async fn find_sent(
        &self,
        member_id: MemberId,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Reservation>>;
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation>;
    // 返却待ちで end_before より前に終了し、reminded_on の日にまだ通知していない予約を取得する
    async fn find_return_reminder_targets(
        &self,
        end_before: DateTime<Utc>,
        reminded_on: NaiveDate,
    ) -> AppResult<Vec<ReturnReminderTarget>>;
}
