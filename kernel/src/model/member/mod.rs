use crate::model::{id::MemberId, role::Role};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub email: String,
    pub nickname: String,
    pub role: Role,
}
