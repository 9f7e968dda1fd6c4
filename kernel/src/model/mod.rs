pub mod auth;
pub mod chat;
pub mod id;
pub mod job;
pub mod list;
pub mod member;
pub mod notification;
pub mod report;
pub mod reservation;
pub mod role;
