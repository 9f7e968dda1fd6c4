use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use kernel::model::report::event::CreateReport;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        report::{CreateReportRequest, CreateReportRequestWithReporter, ReportResponse},
        ApiResponse,
    },
};

pub async fn create_report(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateReportRequest>, AppError>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let event = CreateReport::try_from(CreateReportRequestWithReporter::new(user.id(), req))?;

    let report = registry.report_repository().create(event).await?;
    tracing::info!(
        report_id = %report.id,
        reported_by = %report.reported_by,
        report_type = report.target.report_type().as_ref(),
        "report created"
    );

    Ok(ApiResponse::created(
        "report created",
        ReportResponse::from(report),
    ))
}
