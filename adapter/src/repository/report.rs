use async_trait::async_trait;
use derive_new::new;
use kernel::model::report::{event::CreateReport, Report, ReportTarget};
use kernel::repository::report::ReportRepository;
use shared::error::{AppError, AppResult};

use crate::database::{is_unique_violation, model::report::ReportRow, ConnectionPool};

#[derive(new)]
pub struct ReportRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn create(&self, event: CreateReport) -> AppResult<Report> {
        // ① 通報対象の存在確認。report_type によって参照先のテーブルが変わる
        if !self.target_exists(event.target).await? {
            return Err(AppError::EntityNotFound(
                event.target.not_found_message().into(),
            ));
        }

        // ② 自分自身は通報できない
        if event.target.is_member(event.reported_by) {
            return Err(AppError::SelfReport);
        }

        // ③ 重複通報は (member_id, report_type, target_id) の一意制約で弾く。
        // 事前に SELECT で確認すると同時に来た 2 つの通報が両方通ってしまうため、
        // INSERT の一意制約違反をそのまま重複エラーに読み替える
        let row: ReportRow = sqlx::query_as(
            r#"
                INSERT INTO reports (report_type, target_id, comment, member_id)
                VALUES ($1, $2, $3, $4)
                RETURNING report_id, report_type, target_id, comment, member_id,
                          created_at, modified_at
            "#,
        )
        .bind(event.target.report_type().as_ref())
        .bind(event.target.target_id())
        .bind(&event.comment)
        .bind(event.reported_by)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateReport
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        Report::try_from(row)
    }
}

impl ReportRepositoryImpl {
    async fn target_exists(&self, target: ReportTarget) -> AppResult<bool> {
        let query = match target {
            ReportTarget::Post(id) => {
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE post_id = $1)")
                    .bind(id)
            }
            ReportTarget::Member(id) => {
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM members WHERE member_id = $1)")
                    .bind(id)
            }
            ReportTarget::Review(id) => {
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM reviews WHERE review_id = $1)")
                    .bind(id)
            }
        };
        query
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::{
        id::MemberId,
        report::{ReportTarget, ReportType},
    };

    async fn count_reports(pool: &sqlx::PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn report(report_type: ReportType, target_id: i64, comment: &str) -> CreateReport {
        CreateReport::new(
            ReportTarget::new(report_type, target_id),
            comment.into(),
            MemberId::new(1),
        )
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_report_for_each_target_type(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let post = repo.create(report(ReportType::Post, 1, "spam post")).await?;
        assert_eq!(post.target, ReportTarget::new(ReportType::Post, 1));
        assert_eq!(post.comment, "spam post");
        assert_eq!(post.reported_by, MemberId::new(1));

        let member = repo.create(report(ReportType::Member, 2, "rude")).await?;
        assert_eq!(member.target.report_type(), ReportType::Member);

        let review = repo.create(report(ReportType::Review, 1, "fake")).await?;
        assert_eq!(review.target.target_id(), 1);

        assert_eq!(count_reports(&pool).await, 3);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_report_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        repo.create(report(ReportType::Post, 1, "first")).await?;
        let res = repo.create(report(ReportType::Post, 1, "second")).await;
        assert!(matches!(res, Err(AppError::DuplicateReport)));
        assert_eq!(count_reports(&pool).await, 1);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_duplicates_create_one_row(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let (a, b) = tokio::join!(
            repo.create(report(ReportType::Member, 3, "a")),
            repo.create(report(ReportType::Member, 3, "b")),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(count_reports(&pool).await, 1);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_self_report_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let res = repo.create(report(ReportType::Member, 1, "me")).await;
        assert!(matches!(res, Err(AppError::SelfReport)));
        assert_eq!(count_reports(&pool).await, 0);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_missing_target_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let res = repo.create(report(ReportType::Post, 999, "missing")).await;
        match res {
            Err(AppError::EntityNotFound(msg)) => assert_eq!(msg, "target post does not exist"),
            other => panic!("unexpected result: {other:?}"),
        }
        let res = repo.create(report(ReportType::Review, 999, "missing")).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        assert_eq!(count_reports(&pool).await, 0);
        Ok(())
    }
}
