use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use derive_new::new;
use kernel::model::{
    notification::{event::CreateNotification, NotificationType},
    reservation::ReturnReminderTarget,
};
use kernel::repository::{
    notification::NotificationRepository, reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};

use crate::trigger::start_of_day;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSummary {
    pub candidates: usize,
    pub notified: usize,
    pub skipped: usize,
    pub failed: usize,
}

// 返却期限が明日以前 (期限切れを含む) の貸出中予約に、返却リマインダーを 1 日 1 回送る
#[derive(new)]
pub struct ReturnReminderJob {
    reservation_repository: Arc<dyn ReservationRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
}

impl ReturnReminderJob {
    pub async fn run<Tz: TimeZone>(&self, now: DateTime<Tz>) -> AppResult<ReminderSummary>
    where
        Tz::Offset: std::fmt::Display,
    {
        let (today, end_before) = return_window(&now)?;
        let targets = self
            .reservation_repository
            .find_return_reminder_targets(end_before, today)
            .await?;

        let mut summary = ReminderSummary {
            candidates: targets.len(),
            ..Default::default()
        };

        for target in targets {
            let reservation_id = target.reservation_id;
            let event = reminder_notification(&target, &now);
            // 1 件の失敗で残りの予約への通知を止めない
            match self
                .notification_repository
                .create_return_reminder(reservation_id, today, event)
                .await
            {
                Ok(true) => summary.notified += 1,
                Ok(false) => {
                    tracing::debug!(%reservation_id, "return reminder already sent today");
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::error!(
                        %reservation_id,
                        error.message = %e,
                        "failed to send return reminder"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            candidates = summary.candidates,
            notified = summary.notified,
            skipped = summary.skipped,
            failed = summary.failed,
            "return reminder job finished"
        );
        Ok(summary)
    }
}

// 今日の日付と、対象とする返却期限の上限 (明後日の 0 時) を返す
fn return_window<Tz: TimeZone>(now: &DateTime<Tz>) -> AppResult<(NaiveDate, DateTime<Utc>)> {
    let today = now.date_naive();
    let end_before = today
        .checked_add_days(Days::new(2))
        .and_then(|date| start_of_day(&now.timezone(), date))
        .ok_or_else(|| {
            AppError::UnprocessableEntity(format!("no reminder window after {today}"))
        })?;
    Ok((today, end_before.with_timezone(&Utc)))
}

fn reminder_notification<Tz: TimeZone>(
    target: &ReturnReminderTarget,
    now: &DateTime<Tz>,
) -> CreateNotification
where
    Tz::Offset: std::fmt::Display,
{
    let end_at = target.reservation_end_at.with_timezone(&now.timezone());
    let message = if end_at < *now {
        format!(
            "The return of \"{}\" was due on {}. Please return it as soon as possible.",
            target.post_title,
            end_at.format("%Y-%m-%d %H:%M")
        )
    } else {
        format!(
            "\"{}\" is due for return on {}.",
            target.post_title,
            end_at.format("%Y-%m-%d %H:%M")
        )
    };
    CreateNotification::new(
        target.reserved_by,
        NotificationType::ReturnReminder,
        target.reservation_id.raw(),
        message,
    )
}
