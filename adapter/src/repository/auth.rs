use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::MemberId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use super::password::verify_password;
use crate::{
    database::ConnectionPool,
    redis::{
        model::{RedisKey, RedisValue},
        RedisClient,
    },
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_member_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<MemberId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedMemberId::into_inner))
    }

    async fn verify_member(&self, email: &str, password: &str) -> AppResult<MemberId> {
        let row: Option<(MemberId, String)> =
            sqlx::query_as("SELECT member_id, password_hash FROM members WHERE email = $1")
                .bind(email)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        // メールアドレスが存在しない場合もパスワード不一致と同じエラーにする
        let Some((member_id, password_hash)) = row else {
            return Err(AppError::UnauthenticatedError);
        };
        if !verify_password(password.to_string(), password_hash).await? {
            return Err(AppError::UnauthenticatedError);
        }
        Ok(member_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let access_token = AccessToken(uuid::Uuid::new_v4().simple().to_string());
        let key = AuthorizationKey::from(&access_token);
        let value = AuthorizedMemberId(event.member_id);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = (&access_token).into();
        self.kv.delete(&key).await
    }
}

pub struct AuthorizationKey(String);

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.clone())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedMemberId;

    fn inner(&self) -> String {
        format!("access_token:{}", self.0)
    }
}

pub struct AuthorizedMemberId(MemberId);

impl AuthorizedMemberId {
    pub fn into_inner(self) -> MemberId {
        self.0
    }
}

impl RedisValue for AuthorizedMemberId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedMemberId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse::<i64>()
            .map(|id| Self(id.into()))
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_key_is_namespaced() {
        let key = AuthorizationKey::from(&AccessToken("abc".into()));
        assert_eq!(key.inner(), "access_token:abc");
    }

    #[test]
    fn member_id_value_parses_back() {
        let value = AuthorizedMemberId::try_from("42".to_string()).unwrap();
        assert_eq!(value.into_inner(), MemberId::new(42));
        assert!(AuthorizedMemberId::try_from("x".to_string()).is_err());
    }
}
