use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    chat::ChatMessage,
    id::{ChatMessageId, ChatRoomId, MemberId},
};
use kernel::repository::chat::FoundChatRoom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRoomRequest {
    #[garde(range(min = 1))]
    #[serde(alias = "counterpartyMemberId")]
    pub member_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomResponse {
    pub room_name: String,
    pub room_id: ChatRoomId,
}

impl From<FoundChatRoom> for ChatRoomResponse {
    fn from(value: FoundChatRoom) -> Self {
        Self {
            room_name: value.room.name,
            room_id: value.room.id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatMessageRequest {
    #[garde(length(min = 1, max = 1000))]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub id: ChatMessageId,
    pub chat_room_id: ChatRoomId,
    pub sent_by: MemberId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(value: ChatMessage) -> Self {
        let ChatMessage {
            id,
            chat_room_id,
            sent_by,
            content,
            created_at,
        } = value;
        Self {
            id,
            chat_room_id,
            sent_by,
            content,
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessagesResponse {
    pub items: Vec<ChatMessageResponse>,
}

impl From<Vec<ChatMessage>> for ChatMessagesResponse {
    fn from(value: Vec<ChatMessage>) -> Self {
        Self {
            items: value.into_iter().map(ChatMessageResponse::from).collect(),
        }
    }
}
