use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

pub mod auth;
pub mod chat;
pub mod member;
pub mod notification;
pub mod report;
pub mod reservation;

// {status, msg, data} 形式のレスポンス。HTTP ステータスも status と同じ値で返す
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub msg: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, msg: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            msg: msg.into(),
            data,
        }
    }

    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, msg, data)
    }

    pub fn created(msg: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, msg, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
