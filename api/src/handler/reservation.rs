use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::id::ReservationId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        reservation::{
            CreateReservationRequest, CreateReservationRequestWithMemberId,
            PaginatedReservationResponse, ReservationListQuery, ReservationResponse,
            UpdateReservationStatusRequest, UpdateReservationStatusRequestWithIds,
        },
        ApiResponse,
    },
};

pub async fn create_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateReservationRequest>, AppError>,
) -> AppResult<ApiResponse<ReservationResponse>> {
    req.validate(&())?;

    let event = CreateReservationRequestWithMemberId::new(user.id(), req);
    let reservation = registry.reservation_repository().create(event.into()).await?;
    Ok(ApiResponse::created("reservation created", reservation.into()))
}

pub async fn show_sent_reservations(
    user: AuthorizedUser,
    WithRejection(Query(query), _): WithRejection<Query<ReservationListQuery>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<ApiResponse<PaginatedReservationResponse>> {
    query.validate(&())?;

    registry
        .reservation_repository()
        .find_sent(user.id(), query.into())
        .await
        .map(PaginatedReservationResponse::from)
        .map(|page| ApiResponse::ok("reservations found", page))
}

pub async fn update_reservation_status(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateReservationStatusRequest>, AppError>,
) -> AppResult<ApiResponse<ReservationResponse>> {
    let event = UpdateReservationStatusRequestWithIds::new(reservation_id, user.id(), req);

    registry
        .reservation_repository()
        .update_status(event.into())
        .await
        .map(ReservationResponse::from)
        .map(|reservation| ApiResponse::ok("reservation status updated", reservation))
}
