use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::job::{JobDefinition, JobKey};
use kernel::repository::job::JobRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::job::ScheduledJobRow, ConnectionPool};

#[derive(new)]
pub struct JobRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl JobRepository for JobRepositoryImpl {
    async fn register(&self, definition: JobDefinition) -> AppResult<bool> {
        // 登録済みかどうかの確認と登録を 1 文で行う
        let res = sqlx::query(
            r#"
                INSERT INTO scheduled_jobs (job_name, job_group, trigger_name, fire_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (job_name, job_group) DO NOTHING
            "#,
        )
        .bind(&definition.key.name)
        .bind(&definition.key.group)
        .bind(&definition.trigger_name)
        .bind(definition.fire_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected() == 1)
    }

    async fn find_definition(&self, key: &JobKey) -> AppResult<Option<JobDefinition>> {
        let row: Option<ScheduledJobRow> = sqlx::query_as(
            r#"
                SELECT job_name, job_group, trigger_name, fire_at, last_fired_on
                FROM scheduled_jobs
                WHERE job_name = $1 AND job_group = $2
            "#,
        )
        .bind(&key.name)
        .bind(&key.group)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(JobDefinition::from))
    }

    async fn claim_fire(&self, key: &JobKey, fired_on: NaiveDate) -> AppResult<bool> {
        let res = sqlx::query(
            r#"
                UPDATE scheduled_jobs
                SET last_fired_on = $3
                WHERE job_name = $1 AND job_group = $2
                  AND last_fired_on IS DISTINCT FROM $3
            "#,
        )
        .bind(&key.name)
        .bind(&key.group)
        .bind(fired_on)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn definition(fire_at: NaiveTime) -> JobDefinition {
        JobDefinition {
            key: JobKey::new("returnReminderJob", "reservation"),
            trigger_name: "returnReminderTrigger".into(),
            fire_at,
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_is_idempotent(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = JobRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        assert!(repo.register(definition(ten)).await?);
        // 2 回目は時刻を変えても登録されず、最初の定義が残る
        let eleven = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        assert!(!repo.register(definition(eleven)).await?);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scheduled_jobs")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);

        let stored = repo.find_definition(&definition(ten).key).await?;
        assert_eq!(stored, Some(definition(ten)));
        Ok(())
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_claim_fire_once_per_day(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = JobRepositoryImpl::new(ConnectionPool::new(pool));
        let def = definition(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        repo.register(def.clone()).await?;

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(repo.claim_fire(&def.key, today).await?);
        assert!(!repo.claim_fire(&def.key, today).await?);
        assert!(repo.claim_fire(&def.key, today.succ_opt().unwrap()).await?);

        let unknown = JobKey::new("unknown", "reservation");
        assert!(!repo.claim_fire(&unknown, today).await?);
        Ok(())
    }
}
