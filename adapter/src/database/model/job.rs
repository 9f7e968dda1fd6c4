use chrono::{NaiveDate, NaiveTime};
use kernel::model::job::{JobDefinition, JobKey};

#[derive(sqlx::FromRow)]
pub struct ScheduledJobRow {
    pub job_name: String,
    pub job_group: String,
    pub trigger_name: String,
    pub fire_at: NaiveTime,
    pub last_fired_on: Option<NaiveDate>,
}

impl From<ScheduledJobRow> for JobDefinition {
    fn from(value: ScheduledJobRow) -> Self {
        let ScheduledJobRow {
            job_name,
            job_group,
            trigger_name,
            fire_at,
            last_fired_on: _,
        } = value;
        JobDefinition {
            key: JobKey::new(job_name, job_group),
            trigger_name,
            fire_at,
        }
    }
}
