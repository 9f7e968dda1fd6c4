use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{MemberId, ReportId},
    report::{event::CreateReport, Report, ReportTarget, ReportType},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

// 欠けた項目は serde ではなく garde で検出し、全項目分のエラーを 1 つのメッセージにまとめる
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[garde(required)]
    pub report_type: Option<ReportType>,
    #[garde(required)]
    pub target_id: Option<i64>,
    #[garde(custom(not_blank))]
    pub comment: Option<String>,
}

fn not_blank(value: &Option<String>, _: &()) -> garde::Result {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(garde::Error::new("must not be blank")),
    }
}

#[derive(new)]
pub struct CreateReportRequestWithReporter(MemberId, CreateReportRequest);

impl TryFrom<CreateReportRequestWithReporter> for CreateReport {
    type Error = AppError;

    fn try_from(value: CreateReportRequestWithReporter) -> Result<Self, Self::Error> {
        let CreateReportRequestWithReporter(reported_by, request) = value;
        request.validate(&())?;
        let CreateReportRequest {
            report_type,
            target_id,
            comment,
        } = request;
        match (report_type, target_id, comment) {
            (Some(report_type), Some(target_id), Some(comment)) => Ok(CreateReport::new(
                ReportTarget::new(report_type, target_id),
                comment,
                reported_by,
            )),
            _ => Err(AppError::ValidationError(
                "reportType, targetId and comment are required".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub report_type: ReportType,
    pub target_id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(value: Report) -> Self {
        let Report {
            id,
            target,
            comment,
            created_at,
            modified_at,
            ..
        } = value;
        Self {
            id,
            report_type: target.report_type(),
            target_id: target.target_id(),
            comment,
            created_at,
            modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateReportRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn every_missing_field_is_reported_at_once() {
        let req = request(serde_json::json!({
            "reportType": null,
            "targetId": null,
            "comment": "   ",
        }));
        let err = CreateReport::try_from(CreateReportRequestWithReporter::new(
            MemberId::new(1),
            req,
        ))
        .unwrap_err();
        let AppError::ValidationError(msg) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert!(msg.contains("reportType"), "{msg}");
        assert!(msg.contains("targetId"), "{msg}");
        assert!(msg.contains("comment"), "{msg}");
    }

    #[test]
    fn valid_request_becomes_a_tagged_target() {
        let req = request(serde_json::json!({
            "reportType": "MEMBER",
            "targetId": 3,
            "comment": "spam",
        }));
        let event = CreateReport::try_from(CreateReportRequestWithReporter::new(
            MemberId::new(1),
            req,
        ))
        .unwrap();
        assert_eq!(event.target, ReportTarget::Member(MemberId::new(3)));
        assert_eq!(event.comment, "spam");
        assert_eq!(event.reported_by, MemberId::new(1));
    }
}
