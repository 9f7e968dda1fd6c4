use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::model::id::{MemberId, PostId, ReportId, ReviewId};

pub mod event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Post,
    Member,
    Review,
}

// 通報対象は report_type と target_id の組で一意に決まる。
// 存在確認はこの列挙のタグごとに参照先テーブルを切り替えて行う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Post(PostId),
    Member(MemberId),
    Review(ReviewId),
}

impl ReportTarget {
    pub fn new(report_type: ReportType, target_id: i64) -> Self {
        match report_type {
            ReportType::Post => Self::Post(target_id.into()),
            ReportType::Member => Self::Member(target_id.into()),
            ReportType::Review => Self::Review(target_id.into()),
        }
    }

    pub fn report_type(&self) -> ReportType {
        match self {
            Self::Post(_) => ReportType::Post,
            Self::Member(_) => ReportType::Member,
            Self::Review(_) => ReportType::Review,
        }
    }

    pub fn target_id(&self) -> i64 {
        match self {
            Self::Post(id) => id.raw(),
            Self::Member(id) => id.raw(),
            Self::Review(id) => id.raw(),
        }
    }

    pub fn is_member(&self, member_id: MemberId) -> bool {
        matches!(self, Self::Member(id) if *id == member_id)
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            Self::Post(_) => "target post does not exist",
            Self::Member(_) => "target member does not exist",
            Self::Review(_) => "target review does not exist",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub id: ReportId,
    pub target: ReportTarget,
    pub comment: String,
    pub reported_by: MemberId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
