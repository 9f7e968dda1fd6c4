use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::report::{event::CreateReport, Report};

#[mockall::automock]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    // 対象の存在確認・本人通報の禁止・重複通報の禁止をこの順に検査してから登録する
    async fn create(&self, event: CreateReport) -> AppResult<Report>;
}
