use chrono::{DateTime, Utc};
use kernel::model::{
    chat::{ChatMessage, ChatRoom, MemberPair},
    id::{ChatMessageId, ChatRoomId, MemberId},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct ChatRoomRow {
    pub chat_room_id: ChatRoomId,
    pub name: String,
    pub member_low_id: MemberId,
    pub member_high_id: MemberId,
}

impl TryFrom<ChatRoomRow> for ChatRoom {
    type Error = AppError;

    fn try_from(value: ChatRoomRow) -> Result<Self, Self::Error> {
        let ChatRoomRow {
            chat_room_id,
            name,
            member_low_id,
            member_high_id,
        } = value;
        let members = MemberPair::new(member_low_id, member_high_id).ok_or_else(|| {
            AppError::ConversionEntityError(format!(
                "chat room {chat_room_id} pairs member {member_low_id} with itself"
            ))
        })?;
        Ok(ChatRoom {
            id: chat_room_id,
            name,
            members,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct ChatMessageRow {
    pub chat_message_id: ChatMessageId,
    pub chat_room_id: ChatRoomId,
    pub member_id: MemberId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(value: ChatMessageRow) -> Self {
        let ChatMessageRow {
            chat_message_id,
            chat_room_id,
            member_id,
            content,
            created_at,
        } = value;
        ChatMessage {
            id: chat_message_id,
            chat_room_id,
            sent_by: member_id,
            content,
            created_at,
        }
    }
}
