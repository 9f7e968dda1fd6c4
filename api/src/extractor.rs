use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::MemberId, member::Member};
use registry::AppRegistry;
use shared::error::AppError;

// リクエストヘッダのアクセストークンから解決したログイン中のメンバー
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub member: Member,
}

impl AuthorizedUser {
    pub fn id(&self) -> MemberId {
        self.member.id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthenticatedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let member_id = registry
            .auth_repository()
            .fetch_member_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        let member = registry
            .member_repository()
            .find_current_member(member_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self {
            access_token,
            member,
        })
    }
}
