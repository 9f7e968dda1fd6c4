use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{MemberId, PostId, ReservationId},
    list::{ListOptions, PaginatedList},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        DeliveryMethod, Reservation, ReservationStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub receive_method: DeliveryMethod,
    #[garde(length(max = 255))]
    pub receive_address1: Option<String>,
    #[garde(length(max = 255))]
    pub receive_address2: Option<String>,
    #[garde(skip)]
    pub return_method: DeliveryMethod,
    #[garde(skip)]
    pub reservation_start_at: DateTime<Utc>,
    #[garde(skip)]
    pub reservation_end_at: DateTime<Utc>,
    #[garde(range(min = 1))]
    pub post_id: i64,
}

#[derive(new)]
pub struct CreateReservationRequestWithMemberId(MemberId, CreateReservationRequest);

impl From<CreateReservationRequestWithMemberId> for CreateReservation {
    fn from(value: CreateReservationRequestWithMemberId) -> Self {
        let CreateReservationRequestWithMemberId(
            reserved_by,
            CreateReservationRequest {
                receive_method,
                receive_address1,
                receive_address2,
                return_method,
                reservation_start_at,
                reservation_end_at,
                post_id,
            },
        ) = value;
        CreateReservation::new(
            PostId::new(post_id),
            reserved_by,
            receive_method,
            receive_address1,
            receive_address2,
            return_method,
            reservation_start_at,
            reservation_end_at,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

#[derive(new)]
pub struct UpdateReservationStatusRequestWithIds(
    ReservationId,
    MemberId,
    UpdateReservationStatusRequest,
);

impl From<UpdateReservationStatusRequestWithIds> for UpdateReservationStatus {
    fn from(value: UpdateReservationStatusRequestWithIds) -> Self {
        let UpdateReservationStatusRequestWithIds(
            reservation_id,
            requested_by,
            UpdateReservationStatusRequest { status },
        ) = value;
        UpdateReservationStatus::new(reservation_id, requested_by, status)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReservationListQuery {
    #[garde(range(min = 0, max = MAX_PAGE))]
    #[serde(default)]
    pub page: i64,
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_size")]
    pub size: i64,
}

const MAX_PAGE: i64 = 1_000_000;
const DEFAULT_SIZE: i64 = 10;
const fn default_size() -> i64 {
    DEFAULT_SIZE
}

impl From<ReservationListQuery> for ListOptions {
    fn from(value: ReservationListQuery) -> Self {
        let ReservationListQuery { page, size } = value;
        Self { page, size }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub receive_method: DeliveryMethod,
    pub receive_address1: Option<String>,
    pub receive_address2: Option<String>,
    pub return_method: DeliveryMethod,
    pub reservation_start_at: DateTime<Utc>,
    pub reservation_end_at: DateTime<Utc>,
    pub reserved_by: MemberId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            status,
            receive_method,
            receive_address1,
            receive_address2,
            return_method,
            reservation_start_at,
            reservation_end_at,
            reserved_by,
            post_id,
            created_at,
            modified_at,
        } = value;
        Self {
            id,
            status,
            receive_method,
            receive_address1,
            receive_address2,
            return_method,
            reservation_start_at,
            reservation_end_at,
            reserved_by,
            post_id,
            created_at,
            modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedReservationResponse {
    pub content: Vec<ReservationResponse>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl From<PaginatedList<Reservation>> for PaginatedReservationResponse {
    fn from(value: PaginatedList<Reservation>) -> Self {
        let total_pages = value.total_pages();
        let PaginatedList {
            total,
            page,
            size,
            items,
        } = value;
        Self {
            content: items.into_iter().map(ReservationResponse::from).collect(),
            page,
            size,
            total_elements: total,
            total_pages,
        }
    }
}
