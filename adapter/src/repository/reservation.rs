use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use kernel::model::{
    id::MemberId,
    list::{ListOptions, PaginatedList},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation, ReservationActor, ReservationStatus, ReturnReminderTarget,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{
        parse_column,
        reservation::{
            PaginatedReservationRow, ReservationRow, ReservationStateRow, ReturnReminderRow,
        },
    },
    ConnectionPool,
};

const RESERVATION_COLUMNS: &str = r#"
    reservation_id, status, receive_method, receive_address1, receive_address2,
    return_method, reservation_start_at, reservation_end_at, member_id, post_id,
    created_at, modified_at
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        if event.reservation_start_at >= event.reservation_end_at {
            return Err(AppError::BadRequest(
                "reservation end must be after its start".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の投稿 ID をもつ投稿が存在するか
        // - 存在した場合、予約者が投稿者本人ではないか
        {
            let author_id: Option<MemberId> =
                sqlx::query_scalar("SELECT author_id FROM posts WHERE post_id = $1")
                    .bind(event.post_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            match author_id {
                None => {
                    return Err(AppError::EntityNotFound(format!(
                        "post {} does not exist",
                        event.post_id
                    )))
                }
                Some(author_id) if author_id == event.reserved_by => {
                    return Err(AppError::BadRequest(
                        "cannot reserve your own post".into(),
                    ))
                }
                Some(_) => {}
            }
        }

        let row: ReservationRow = sqlx::query_as(&format!(
            r#"
                INSERT INTO reservations
                (status, receive_method, receive_address1, receive_address2, return_method,
                 reservation_start_at, reservation_end_at, member_id, post_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(ReservationStatus::PendingApproval.as_ref())
        .bind(event.receive_method.as_ref())
        .bind(&event.receive_address1)
        .bind(&event.receive_address2)
        .bind(event.return_method.as_ref())
        .bind(event.reservation_start_at)
        .bind(event.reservation_end_at)
        .bind(event.reserved_by)
        .bind(event.post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Reservation::try_from(row)
    }

    async fn find_sent(
        &self,
        member_id: MemberId,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Reservation>> {
        let offset = options.offset()?;
        let rows: Vec<PaginatedReservationRow> = sqlx::query_as(&format!(
            r#"
                SELECT COUNT(*) OVER() AS total, {RESERVATION_COLUMNS}
                FROM reservations
                WHERE member_id = $1
                ORDER BY created_at DESC, reservation_id DESC
                LIMIT $2
                OFFSET $3
            "#
        ))
        .bind(member_id)
        .bind(options.size)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // レコードが 1 件もないときは総件数も 0 とする
        let total = rows.first().map(|r| r.total).unwrap_or_default();
        let items = rows
            .into_iter()
            .map(|r| Reservation::try_from(r.reservation))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedList {
            total,
            page: options.page,
            size: options.size,
            items,
        })
    }

    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // 行ロックを取り、同時に来た状態変更を直列化する
        let state: ReservationStateRow = sqlx::query_as(
            r#"
                SELECT r.status, r.member_id, p.author_id
                FROM reservations AS r
                INNER JOIN posts AS p ON r.post_id = p.post_id
                WHERE r.reservation_id = $1
                FOR UPDATE OF r
            "#,
        )
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "reservation {} does not exist",
                event.reservation_id
            ))
        })?;

        // 予約者か投稿者のみが状態を変更でき、遷移ごとに実行できる側が決まっている
        let actor = if event.requested_by == state.author_id {
            ReservationActor::Owner
        } else if event.requested_by == state.member_id {
            ReservationActor::Borrower
        } else {
            return Err(AppError::ForbiddenOperation);
        };

        let current = parse_column::<ReservationStatus>("status", &state.status)?;
        match current.transition_actor(event.status) {
            None => {
                return Err(AppError::UnprocessableEntity(format!(
                    "cannot change reservation status from {} to {}",
                    current.as_ref(),
                    event.status.as_ref()
                )))
            }
            Some(allowed) if allowed != actor => return Err(AppError::ForbiddenOperation),
            Some(_) => {}
        }

        let row: ReservationRow = sqlx::query_as(&format!(
            r#"
                UPDATE reservations
                SET status = $1
                WHERE reservation_id = $2
                RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(event.status.as_ref())
        .bind(event.reservation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Reservation::try_from(row)
    }

    async fn find_return_reminder_targets(
        &self,
        end_before: DateTime<Utc>,
        reminded_on: NaiveDate,
    ) -> AppResult<Vec<ReturnReminderTarget>> {
        sqlx::query_as::<_, ReturnReminderRow>(
            r#"
                SELECT
                r.reservation_id,
                r.member_id,
                p.title,
                r.reservation_end_at
                FROM reservations AS r
                INNER JOIN posts AS p ON r.post_id = p.post_id
                WHERE r.status = ANY($1)
                  AND r.reservation_end_at < $2
                  AND r.last_reminded_on IS DISTINCT FROM $3
                ORDER BY r.reservation_end_at ASC
            "#,
        )
        .bind(awaiting_return_statuses())
        .bind(end_before)
        .bind(reminded_on)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(ReturnReminderTarget::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}

pub(crate) fn awaiting_return_statuses() -> Vec<String> {
    ReservationStatus::awaiting_return()
        .iter()
        .map(|s| s.as_ref().to_string())
        .collect()
}
