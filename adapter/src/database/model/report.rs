use chrono::{DateTime, Utc};
use kernel::model::{
    id::{MemberId, ReportId},
    report::{Report, ReportTarget, ReportType},
};
use shared::error::AppError;

use super::parse_column;

#[derive(sqlx::FromRow)]
pub struct ReportRow {
    pub report_id: ReportId,
    pub report_type: String,
    pub target_id: i64,
    pub comment: String,
    pub member_id: MemberId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = AppError;

    fn try_from(value: ReportRow) -> Result<Self, Self::Error> {
        let ReportRow {
            report_id,
            report_type,
            target_id,
            comment,
            member_id,
            created_at,
            modified_at,
        } = value;
        let report_type = parse_column::<ReportType>("report_type", &report_type)?;
        Ok(Report {
            id: report_id,
            target: ReportTarget::new(report_type, target_id),
            comment,
            reported_by: member_id,
            created_at,
            modified_at,
        })
    }
}
