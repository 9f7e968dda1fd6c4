pub mod auth;
pub mod chat;
pub mod health;
pub mod member;
pub mod notification;
pub mod report;
pub mod reservation;
