use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

use crate::model::job::{JobDefinition, JobKey};

#[mockall::automock]
#[async_trait]
pub trait JobRepository: Send + Sync {
    // 同じキーのジョブがまだなければ登録して true、登録済みなら何もせず false を返す
    async fn register(&self, definition: JobDefinition) -> AppResult<bool>;
    async fn find_definition(&self, key: &JobKey) -> AppResult<Option<JobDefinition>>;
    // fired_on の日の発火権を取得する。複数プロセスのうち 1 つだけが true を得る
    async fn claim_fire(&self, key: &JobKey, fired_on: NaiveDate) -> AppResult<bool>;
}
