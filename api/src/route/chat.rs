use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::chat::{find_or_create_chat_room, send_chat_message, show_chat_messages};

pub fn build_chat_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(find_or_create_chat_room))
        .route("/:room_id/messages", post(send_chat_message))
        .route("/:room_id/messages", get(show_chat_messages));
    Router::new().nest("/chats", routers)
}
