use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("already reported this target")]
    DuplicateReport,
    #[error("cannot report yourself")]
    SelfReport,
    #[error("transaction could not be executed")]
    TransactionError(#[source] sqlx::Error),
    #[error("an error occurred while running a database query")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("background task failed: {0}")]
    BackgroundTaskError(#[from] tokio::task::JoinError),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("login required")]
    UnauthenticatedError,
    #[error("operation not permitted")]
    ForbiddenOperation,
}

impl From<garde::Report> for AppError {
    fn from(report: garde::Report) -> Self {
        let msg = report
            .iter()
            .map(|(path, error)| format!("{}: {}", camel_case(&path.to_string()), error))
            .collect::<Vec<_>>()
            .join(", ");
        AppError::ValidationError(msg)
    }
}

// 型の合わない値や壊れた JSON も、検証エラーと同じ 400 の JSON ボディで返す
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

// garde のパスは Rust のフィールド名 (snake_case) なので、リクエストボディと同じ camelCase に揃える
fn camel_case(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut upper = false;
    for c in path.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateReport | AppError::SelfReport => StatusCode::CONFLICT,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::BackgroundTaskError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let body = Json(serde_json::json!({
            "status": status_code.as_u16(),
            "msg": self.to_string(),
        }));
        (status_code, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
