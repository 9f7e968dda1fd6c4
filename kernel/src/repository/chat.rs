use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    chat::{
        event::{CreateChatMessage, FindOrCreateChatRoom},
        ChatMessage, ChatRoom,
    },
    id::ChatRoomId,
};

// find_or_create_room の結果。created が true なら今回新しく作成したルーム
#[derive(Debug)]
pub struct FoundChatRoom {
    pub room: ChatRoom,
    pub created: bool,
}

#[mockall::automock]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_or_create_room(&self, event: FindOrCreateChatRoom) -> AppResult<FoundChatRoom>;
    async fn find_room_by_id(&self, chat_room_id: ChatRoomId) -> AppResult<Option<ChatRoom>>;
    async fn create_message(&self, event: CreateChatMessage) -> AppResult<ChatMessage>;
    // 作成日時の昇順で返す
    async fn find_messages(&self, chat_room_id: ChatRoomId) -> AppResult<Vec<ChatMessage>>;
}
