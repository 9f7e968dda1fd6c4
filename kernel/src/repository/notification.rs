use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

use crate::model::{
    id::{MemberId, ReservationId},
    notification::{event::CreateNotification, Notification},
};

#[mockall::automock]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    // 予約に reminded_on の送信済み印を付け、付けられた場合に限り通知を登録する。
    // 同じ日に 2 回呼ばれても通知は 1 件しか作られず、2 回目は false を返す
    async fn create_return_reminder(
        &self,
        reservation_id: ReservationId,
        reminded_on: NaiveDate,
        event: CreateNotification,
    ) -> AppResult<bool>;
    // 新しい順に返す
    async fn find_by_member(&self, member_id: MemberId) -> AppResult<Vec<Notification>>;
}
