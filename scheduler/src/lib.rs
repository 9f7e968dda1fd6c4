use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime};
use kernel::model::job::{JobDefinition, JobKey};
use kernel::repository::job::JobRepository;
use registry::AppRegistry;
use shared::{config::ReminderConfig, error::AppResult};
use tokio::task::JoinHandle;

pub mod job;
pub mod trigger;

use job::{ReminderSummary, ReturnReminderJob};
use trigger::DailyTrigger;

pub const RETURN_REMINDER_JOB: &str = "returnReminderJob";
pub const RETURN_REMINDER_GROUP: &str = "reservation";
pub const RETURN_REMINDER_TRIGGER: &str = "returnReminderTrigger";

pub struct ReservationRemindScheduler {
    job_repository: Arc<dyn JobRepository>,
    job: ReturnReminderJob,
    definition: JobDefinition,
}

impl ReservationRemindScheduler {
    pub fn new(registry: &AppRegistry) -> anyhow::Result<Self> {
        let job = ReturnReminderJob::new(
            registry.reservation_repository(),
            registry.notification_repository(),
        );
        Ok(Self::with_parts(
            registry.job_repository(),
            job,
            return_reminder_definition(registry.reminder_config())?,
        ))
    }

    fn with_parts(
        job_repository: Arc<dyn JobRepository>,
        job: ReturnReminderJob,
        definition: JobDefinition,
    ) -> Self {
        Self {
            job_repository,
            job,
            definition,
        }
    }

    /// ジョブ定義をジョブストアに登録し、以後の発火に使う定義を返す。
    ///
    /// 登録済みかどうかはストアの内容だけで判断するため、何度呼んでも定義は 1 つに保たれる。
    /// ストアに到達できない場合はエラーログを出して `None` を返し、プロセスは止めない。
    pub async fn init(&self) -> Option<JobDefinition> {
        let key = &self.definition.key;
        match self.job_repository.register(self.definition.clone()).await {
            Ok(true) => {
                tracing::info!(job = %key, fire_at = %self.definition.fire_at, "job registered")
            }
            Ok(false) => tracing::info!(job = %key, "job already registered, skipping"),
            Err(e) => {
                tracing::error!(job = %key, error.message = %e, "failed to register job");
                return None;
            }
        }

        // 以前のプロセスが登録した定義があればそちらのトリガー時刻に従う
        match self.job_repository.find_definition(key).await {
            Ok(Some(definition)) => Some(definition),
            Ok(None) => {
                tracing::error!(job = %key, "registered job definition disappeared");
                None
            }
            Err(e) => {
                tracing::error!(job = %key, error.message = %e, "failed to load job definition");
                None
            }
        }
    }

    // 今日の発火権を取れたときだけジョブを実行する
    pub async fn fire(&self, now: DateTime<Local>) -> AppResult<Option<ReminderSummary>> {
        let key = &self.definition.key;
        if !self
            .job_repository
            .claim_fire(key, now.date_naive())
            .await?
        {
            tracing::info!(job = %key, "tick already claimed by another instance");
            return Ok(None);
        }
        self.job.run(now).await.map(Some)
    }

    pub async fn start(self) -> Option<JoinHandle<()>> {
        let definition = self.init().await?;
        let trigger = DailyTrigger::new(definition.fire_at);
        let handle = tokio::spawn(async move {
            loop {
                let now = Local::now();
                let next = trigger.next_fire_after(&now);
                let wait = (next - now).to_std().unwrap_or_default();
                tracing::debug!(
                    job = %definition.key,
                    next_fire_at = %next,
                    "waiting for next fire"
                );
                tokio::time::sleep(wait).await;

                if let Err(e) = self.fire(Local::now()).await {
                    tracing::error!(job = %definition.key, error.message = %e, "job run failed");
                }
            }
        });
        Some(handle)
    }
}

pub fn return_reminder_definition(config: ReminderConfig) -> anyhow::Result<JobDefinition> {
    let fire_at = NaiveTime::from_hms_opt(config.hour, config.minute, 0).ok_or_else(|| {
        anyhow::anyhow!(
            "invalid reminder time {:02}:{:02}",
            config.hour,
            config.minute
        )
    })?;
    Ok(JobDefinition {
        key: JobKey::new(RETURN_REMINDER_JOB, RETURN_REMINDER_GROUP),
        trigger_name: RETURN_REMINDER_TRIGGER.into(),
        fire_at,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use kernel::repository::{
        job::MockJobRepository, notification::MockNotificationRepository,
        reservation::MockReservationRepository,
    };
    use shared::error::AppError;

    use super::*;

    // 同じストアを共有する複数プロセスを模したインメモリのジョブストア
    #[derive(Default)]
    struct InMemoryJobStore {
        jobs: Mutex<HashMap<JobKey, (JobDefinition, Option<NaiveDate>)>>,
    }

    #[async_trait]
    impl JobRepository for InMemoryJobStore {
        async fn register(&self, definition: JobDefinition) -> AppResult<bool> {
            let mut jobs = self.jobs.lock().unwrap();
            if jobs.contains_key(&definition.key) {
                return Ok(false);
            }
            jobs.insert(definition.key.clone(), (definition, None));
            Ok(true)
        }

        async fn find_definition(&self, key: &JobKey) -> AppResult<Option<JobDefinition>> {
            Ok(self.jobs.lock().unwrap().get(key).map(|(d, _)| d.clone()))
        }

        async fn claim_fire(&self, key: &JobKey, fired_on: NaiveDate) -> AppResult<bool> {
            let mut jobs = self.jobs.lock().unwrap();
            match jobs.get_mut(key) {
                Some((_, last)) if *last != Some(fired_on) => {
                    *last = Some(fired_on);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    fn idle_job() -> ReturnReminderJob {
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_return_reminder_targets()
            .returning(|_, _| Ok(vec![]));
        ReturnReminderJob::new(
            Arc::new(reservations),
            Arc::new(MockNotificationRepository::new()),
        )
    }

    fn definition_at(hour: u32) -> JobDefinition {
        return_reminder_definition(ReminderConfig {
            enabled: true,
            hour,
            minute: 0,
        })
        .unwrap()
    }

    #[test]
    fn default_definition_fires_daily_at_ten() {
        let definition = return_reminder_definition(ReminderConfig::default()).unwrap();
        assert_eq!(definition.key, JobKey::new("returnReminderJob", "reservation"));
        assert_eq!(definition.trigger_name, "returnReminderTrigger");
        assert_eq!(definition.fire_at, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        let config = ReminderConfig {
            enabled: true,
            hour: 24,
            minute: 0,
        };
        assert!(return_reminder_definition(config).is_err());
    }

    #[tokio::test]
    async fn init_twice_against_the_same_store_registers_once() {
        let store = Arc::new(InMemoryJobStore::default());

        let first =
            ReservationRemindScheduler::with_parts(store.clone(), idle_job(), definition_at(10));
        assert_eq!(first.init().await, Some(definition_at(10)));

        // 再起動後に別の時刻で初期化しても、保存済みの定義が使われる
        let second =
            ReservationRemindScheduler::with_parts(store.clone(), idle_job(), definition_at(11));
        assert_eq!(second.init().await, Some(definition_at(10)));

        assert_eq!(store.jobs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn init_swallows_store_failures() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_register()
            .returning(|_| Err(AppError::NoRowsAffectedError("store down".into())));
        jobs.expect_find_definition().never();

        let scheduler =
            ReservationRemindScheduler::with_parts(Arc::new(jobs), idle_job(), definition_at(10));
        assert_eq!(scheduler.init().await, None);
    }

    #[tokio::test]
    async fn only_one_fire_per_day_runs_the_job() {
        let store = Arc::new(InMemoryJobStore::default());
        let a =
            ReservationRemindScheduler::with_parts(store.clone(), idle_job(), definition_at(10));
        let b =
            ReservationRemindScheduler::with_parts(store.clone(), idle_job(), definition_at(10));
        a.init().await;
        b.init().await;

        let now = Local::now();
        assert_eq!(a.fire(now).await.unwrap(), Some(ReminderSummary::default()));
        assert_eq!(b.fire(now).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unclaimed_tick_does_not_query_reservations() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_claim_fire().returning(|_, _| Ok(false));
        let mut reservations = MockReservationRepository::new();
        reservations.expect_find_return_reminder_targets().never();
        let job = ReturnReminderJob::new(
            Arc::new(reservations),
            Arc::new(MockNotificationRepository::new()),
        );

        let scheduler =
            ReservationRemindScheduler::with_parts(Arc::new(jobs), job, definition_at(10));
        assert_eq!(scheduler.fire(Local::now()).await.unwrap(), None);
    }
}
