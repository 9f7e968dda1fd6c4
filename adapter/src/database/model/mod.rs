pub mod chat;
pub mod job;
pub mod member;
pub mod notification;
pub mod report;
pub mod reservation;

use shared::error::AppError;
use std::str::FromStr;

// DB 上の文字列カラムを列挙型に変換する
pub(crate) fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::ConversionEntityError(format!("invalid {column}: {value}")))
}
