use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{
    chat::{
        event::{CreateChatMessage, FindOrCreateChatRoom},
        ChatRoom,
    },
    id::{ChatRoomId, MemberId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        chat::{
            ChatMessageResponse, ChatMessagesResponse, ChatRoomResponse, CreateChatMessageRequest,
            CreateChatRoomRequest,
        },
        ApiResponse,
    },
};

pub async fn find_or_create_chat_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateChatRoomRequest>, AppError>,
) -> AppResult<ApiResponse<ChatRoomResponse>> {
    req.validate(&())?;

    let counterparty = MemberId::new(req.member_id);
    if counterparty == user.id() {
        return Err(AppError::BadRequest(
            "cannot open a chat room with yourself".into(),
        ));
    }

    let found = registry
        .chat_repository()
        .find_or_create_room(FindOrCreateChatRoom::new(counterparty, user.id()))
        .await?;

    if found.created {
        Ok(ApiResponse::created("chat room created", found.into()))
    } else {
        Ok(ApiResponse::ok("chat room found", found.into()))
    }
}

pub async fn send_chat_message(
    user: AuthorizedUser,
    Path(chat_room_id): Path<ChatRoomId>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateChatMessageRequest>, AppError>,
) -> AppResult<ApiResponse<ChatMessageResponse>> {
    req.validate(&())?;
    joined_room(&registry, chat_room_id, user.id()).await?;

    let message = registry
        .chat_repository()
        .create_message(CreateChatMessage::new(chat_room_id, user.id(), req.content))
        .await?;

    Ok(ApiResponse::created("message sent", message.into()))
}

pub async fn show_chat_messages(
    user: AuthorizedUser,
    Path(chat_room_id): Path<ChatRoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<ApiResponse<ChatMessagesResponse>> {
    joined_room(&registry, chat_room_id, user.id()).await?;

    registry
        .chat_repository()
        .find_messages(chat_room_id)
        .await
        .map(ChatMessagesResponse::from)
        .map(|messages| ApiResponse::ok("messages found", messages))
}

// ルームが存在し、かつメンバーが参加している場合だけ返す
async fn joined_room(
    registry: &AppRegistry,
    chat_room_id: ChatRoomId,
    member_id: MemberId,
) -> AppResult<ChatRoom> {
    let room = registry
        .chat_repository()
        .find_room_by_id(chat_room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("chat room does not exist".into()))?;

    if !room.members.contains(member_id) {
        return Err(AppError::ForbiddenOperation);
    }
    Ok(room)
}
