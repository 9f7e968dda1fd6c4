use axum::extract::State;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::{notification::NotificationsResponse, ApiResponse},
};

pub async fn show_notifications(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<ApiResponse<NotificationsResponse>> {
    registry
        .notification_repository()
        .find_by_member(user.id())
        .await
        .map(NotificationsResponse::from)
        .map(|notifications| ApiResponse::ok("notifications found", notifications))
}
