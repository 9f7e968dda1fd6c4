use garde::Validate;
use kernel::model::{
    id::MemberId,
    member::{event::CreateMember, Member},
    role::Role,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    Admin,
    User,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::User => Self::User,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: MemberId,
    pub email: String,
    pub nickname: String,
    pub role: RoleName,
}

impl From<Member> for MemberResponse {
    fn from(value: Member) -> Self {
        let Member {
            id,
            email,
            nickname,
            role,
        } = value;
        Self {
            id,
            email,
            nickname,
            role: RoleName::from(role),
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[garde(email)]
    email: String,
    #[garde(length(min = 8))]
    password: String,
    #[garde(length(min = 1, max = 30))]
    nickname: String,
}

impl From<CreateMemberRequest> for CreateMember {
    fn from(value: CreateMemberRequest) -> Self {
        let CreateMemberRequest {
            email,
            password,
            nickname,
        } = value;
        Self {
            email,
            password,
            nickname,
        }
    }
}
