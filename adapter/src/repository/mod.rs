pub mod auth;
pub mod chat;
pub mod health;
pub mod job;
pub mod member;
pub mod notification;
mod password;
pub mod report;
pub mod reservation;
