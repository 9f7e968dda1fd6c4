use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::MemberId,
    member::{event::CreateMember, Member},
};

#[mockall::automock]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, event: CreateMember) -> AppResult<Member>;
    async fn find_current_member(&self, member_id: MemberId) -> AppResult<Option<Member>>;
}
