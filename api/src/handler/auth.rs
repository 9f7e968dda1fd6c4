use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        ApiResponse,
    },
};

pub async fn login(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<ApiResponse<AccessTokenResponse>> {
    let member_id = registry
        .auth_repository()
        .verify_member(&req.email, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(member_id))
        .await?;

    Ok(ApiResponse::ok(
        "logged in",
        AccessTokenResponse {
            member_id,
            access_token: access_token.0,
        },
    ))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
