use kernel::model::{id::MemberId, member::Member, role::Role};
use shared::error::AppError;

use super::parse_column;

#[derive(sqlx::FromRow)]
pub struct MemberRow {
    pub member_id: MemberId,
    pub email: String,
    pub nickname: String,
    pub role: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = AppError;

    fn try_from(value: MemberRow) -> Result<Self, Self::Error> {
        let MemberRow {
            member_id,
            email,
            nickname,
            role,
        } = value;
        Ok(Member {
            id: member_id,
            email,
            nickname,
            role: parse_column::<Role>("role", &role)?,
        })
    }
}
