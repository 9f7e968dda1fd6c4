use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::report::create_report;

pub fn build_report_routers() -> Router<AppRegistry> {
    Router::new().route("/reports", post(create_report))
}
