use std::sync::{Arc, Mutex};

use axum::http::{Method, StatusCode};
use chrono::Utc;
use kernel::model::{
    chat::{room_name, ChatMessage, ChatRoom, MemberPair},
    id::{ChatMessageId, ChatRoomId, MemberId},
};
use kernel::repository::chat::{FoundChatRoom, MockChatRepository};
use registry::MockAppRegistryExt;
use serde_json::json;

mod helper;
use helper::{app, authorize_as, get_request, json_request, send};

fn room(id: i64, a: i64, b: i64) -> ChatRoom {
    ChatRoom {
        id: ChatRoomId::new(id),
        name: room_name(&format!("user{a}"), &format!("user{b}")),
        members: MemberPair::new(MemberId::new(a), MemberId::new(b)).unwrap(),
    }
}

#[tokio::test]
async fn room_is_created_once_then_returned() {
    // 1 回目の呼び出しでルームを作り、2 回目以降は同じルームを返すリポジトリ
    let created = Arc::new(Mutex::new(false));

    let build = |member_id: i64| {
        let created = created.clone();
        let mut registry = MockAppRegistryExt::new();
        authorize_as(&mut registry, member_id);
        registry.expect_chat_repository().returning(move || {
            let created = created.clone();
            let mut chats = MockChatRepository::new();
            chats.expect_find_or_create_room().returning(move |event| {
                let mut created = created.lock().unwrap();
                let first = !*created;
                *created = true;
                Ok(FoundChatRoom {
                    room: room(5, event.counterparty.raw(), event.initiator.raw()),
                    created: first,
                })
            });
            Arc::new(chats)
        });
        app(registry)
    };

    let (status, body) = send(
        build(1),
        json_request(Method::POST, "/api/v1/chats", json!({"memberId": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["data"]["roomId"], 5);
    assert_eq!(body["data"]["roomName"], "user2&user1");

    let (status, body) = send(
        build(2),
        json_request(Method::POST, "/api/v1/chats", json!({"memberId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roomId"], 5);
}

#[tokio::test]
async fn chat_with_yourself_is_rejected() {
    let mut registry = MockAppRegistryExt::new();
    authorize_as(&mut registry, 1);
    registry.expect_chat_repository().never();

    let (status, _) = send(
        app(registry),
        json_request(Method::POST, "/api/v1/chats", json!({"memberId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn outsiders_cannot_read_messages() {
    let mut registry = MockAppRegistryExt::new();
    authorize_as(&mut registry, 3);
    registry.expect_chat_repository().returning(|| {
        let mut chats = MockChatRepository::new();
        chats
            .expect_find_room_by_id()
            .returning(|id| Ok(Some(room(id.raw(), 1, 2))));
        chats.expect_find_messages().never();
        Arc::new(chats)
    });

    let (status, body) = send(app(registry), get_request("/api/v1/chats/5/messages")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn members_read_messages_in_order() {
    let mut registry = MockAppRegistryExt::new();
    authorize_as(&mut registry, 1);
    registry.expect_chat_repository().returning(|| {
        let mut chats = MockChatRepository::new();
        chats
            .expect_find_room_by_id()
            .returning(|id| Ok(Some(room(id.raw(), 1, 2))));
        chats.expect_find_messages().returning(|id| {
            Ok(["hi", "hello"]
                .into_iter()
                .enumerate()
                .map(|(i, content)| ChatMessage {
                    id: ChatMessageId::new(i as i64 + 1),
                    chat_room_id: id,
                    sent_by: MemberId::new(i as i64 % 2 + 1),
                    content: content.into(),
                    created_at: Utc::now(),
                })
                .collect())
        });
        Arc::new(chats)
    });

    let (status, body) = send(app(registry), get_request("/api/v1/chats/5/messages")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["items"][0]["content"], "hi");
    assert_eq!(body["data"]["items"][1]["sentBy"], 2);
}

#[tokio::test]
async fn unknown_room_is_not_found() {
    let mut registry = MockAppRegistryExt::new();
    authorize_as(&mut registry, 1);
    registry.expect_chat_repository().returning(|| {
        let mut chats = MockChatRepository::new();
        chats.expect_find_room_by_id().returning(|_| Ok(None));
        Arc::new(chats)
    });

    let (status, _) = send(app(registry), get_request("/api/v1/chats/99/messages")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
