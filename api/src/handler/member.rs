use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        member::{CreateMemberRequest, MemberResponse},
        ApiResponse,
    },
};

pub async fn register_member(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateMemberRequest>, AppError>,
) -> AppResult<ApiResponse<MemberResponse>> {
    req.validate(&())?;

    let member = registry.member_repository().create(req.into()).await?;
    Ok(ApiResponse::created("member registered", member.into()))
}

pub async fn get_current_member(user: AuthorizedUser) -> ApiResponse<MemberResponse> {
    ApiResponse::ok("member found", MemberResponse::from(user.member))
}
