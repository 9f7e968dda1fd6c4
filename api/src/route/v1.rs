use super::{
    chat::build_chat_routers, health::build_health_check_routers, member::build_member_routers,
    notification::build_notification_routers, report::build_report_routers,
    reservation::build_reservation_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_member_routers())
        .merge(build_report_routers())
        .merge(build_chat_routers())
        .merge(build_reservation_routers())
        .merge(build_notification_routers());
    Router::new().nest("/api/v1", router)
}
