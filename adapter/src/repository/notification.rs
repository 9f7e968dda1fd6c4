use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    id::{MemberId, ReservationId},
    notification::{event::CreateNotification, Notification},
};
use kernel::repository::notification::NotificationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::notification::NotificationRow, ConnectionPool};

use super::reservation::awaiting_return_statuses;

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create_return_reminder(
        &self,
        reservation_id: ReservationId,
        reminded_on: NaiveDate,
        event: CreateNotification,
    ) -> AppResult<bool> {
        let mut tx = self.db.begin().await?;

        // 送信済みの印を条件付きで付ける。すでに今日の印がある、または
        // 返却待ちでなくなった予約は 0 件更新となり、通知は作らない
        let marked = sqlx::query(
            r#"
                UPDATE reservations
                SET last_reminded_on = $1
                WHERE reservation_id = $2
                  AND last_reminded_on IS DISTINCT FROM $1
                  AND status = ANY($3)
            "#,
        )
        .bind(reminded_on)
        .bind(reservation_id)
        .bind(awaiting_return_statuses())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if marked.rows_affected() < 1 {
            tx.rollback().await.map_err(AppError::TransactionError)?;
            return Ok(false);
        }

        let res = sqlx::query(
            r#"
                INSERT INTO notifications (member_id, notification_type, target_id, message)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.member_id)
        .bind(event.notification_type.as_ref())
        .bind(event.target_id)
        .bind(&event.message)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no notification record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(true)
    }

    async fn find_by_member(&self, member_id: MemberId) -> AppResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
                SELECT notification_id, member_id, notification_type, target_id,
                       message, is_read, created_at
                FROM notifications
                WHERE member_id = $1
                ORDER BY created_at DESC, notification_id DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Notification::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::notification::NotificationType;

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_return_reminder_is_sent_once_per_day(pool: sqlx::PgPool) -> anyhow::Result<()> {
        sqlx::query("UPDATE reservations SET status = 'RENTING' WHERE reservation_id = 1")
            .execute(&pool)
            .await?;
        let repo = NotificationRepositoryImpl::new(ConnectionPool::new(pool));

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let event = CreateNotification::new(
            MemberId::new(1),
            NotificationType::ReturnReminder,
            1,
            "please return camping tent".into(),
        );
        let id = ReservationId::new(1);

        assert!(repo.create_return_reminder(id, today, event.clone()).await?);
        assert!(!repo.create_return_reminder(id, today, event.clone()).await?);
        assert!(
            repo.create_return_reminder(id, today.succ_opt().unwrap(), event)
                .await?
        );

        let notifications = repo.find_by_member(MemberId::new(1)).await?;
        assert_eq!(notifications.len(), 2);
        assert!(notifications
            .iter()
            .all(|n| n.notification_type == NotificationType::ReturnReminder && !n.is_read));
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_returned_reservation_is_not_reminded(pool: sqlx::PgPool) -> anyhow::Result<()> {
        // fixture の予約 1 は RETURN_COMPLETED
        let repo = NotificationRepositoryImpl::new(ConnectionPool::new(pool));
        let sent = repo
            .create_return_reminder(
                ReservationId::new(1),
                NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
                CreateNotification::new(
                    MemberId::new(1),
                    NotificationType::ReturnReminder,
                    1,
                    "please return".into(),
                ),
            )
            .await?;
        assert!(!sent);
        assert!(repo.find_by_member(MemberId::new(1)).await?.is_empty());
        Ok(())
    }
}
