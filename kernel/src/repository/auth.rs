use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    auth::{event::CreateToken, AccessToken},
    id::MemberId,
};

#[mockall::automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    // アクセストークンからメンバー ID を引く。期限切れや未発行なら None
    async fn fetch_member_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<MemberId>>;
    // メールアドレスとパスワードを照合する
    async fn verify_member(&self, email: &str, password: &str) -> AppResult<MemberId>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
}
