use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    create_reservation, show_sent_reservations, update_reservation_status,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(create_reservation))
        .route("/sent", get(show_sent_reservations))
        .route("/:reservation_id/status", patch(update_reservation_status));
    Router::new().nest("/reservations", routers)
}
