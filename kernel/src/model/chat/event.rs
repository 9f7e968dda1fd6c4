use derive_new::new;

use crate::model::id::{ChatRoomId, MemberId};

// 呼び出し元 (initiator) と相手 (counterparty) の組でチャットルームを探す、なければ作る
#[derive(Debug, new)]
pub struct FindOrCreateChatRoom {
    pub counterparty: MemberId,
    pub initiator: MemberId,
}

#[derive(Debug, new)]
pub struct CreateChatMessage {
    pub chat_room_id: ChatRoomId,
    pub sent_by: MemberId,
    pub content: String,
}
