use derive_new::new;

use crate::model::id::MemberId;

use super::ReportTarget;

#[derive(Debug, new)]
pub struct CreateReport {
    pub target: ReportTarget,
    pub comment: String,
    pub reported_by: MemberId,
}
