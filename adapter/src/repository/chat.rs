use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    chat::{
        event::{CreateChatMessage, FindOrCreateChatRoom},
        room_name, ChatMessage, ChatRoom, MemberPair,
    },
    id::{ChatRoomId, MemberId},
};
use kernel::repository::chat::{ChatRepository, FoundChatRoom};
use shared::error::{AppError, AppResult};

use crate::database::{
    model::chat::{ChatMessageRow, ChatRoomRow},
    ConnectionPool,
};

#[derive(new)]
pub struct ChatRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ChatRepository for ChatRepositoryImpl {
    async fn find_or_create_room(&self, event: FindOrCreateChatRoom) -> AppResult<FoundChatRoom> {
        let pair = MemberPair::new(event.counterparty, event.initiator).ok_or_else(|| {
            AppError::BadRequest("cannot open a chat room with yourself".into())
        })?;

        // ① 両メンバーの存在確認。ルーム名に使うニックネームもここで取得する
        let counterparty_nickname = self.find_nickname(event.counterparty).await?;
        let initiator_nickname = self.find_nickname(event.initiator).await?;

        // ② 既存のルームがあれば、名前も変えずにそのまま返す
        if let Some(room) = self.find_room_by_pair(pair).await? {
            return Ok(FoundChatRoom {
                room,
                created: false,
            });
        }

        // ③ ルームを作成する。同じ組で同時にリクエストが来た場合は一意制約により
        // 片方の INSERT だけが成功し、もう片方は何もせずに先に作られたルームを読み直す
        let name = room_name(&counterparty_nickname, &initiator_nickname);
        let mut tx = self.db.begin().await?;
        let inserted: Option<ChatRoomRow> = sqlx::query_as(
            r#"
                INSERT INTO chat_rooms (name, member_low_id, member_high_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (member_low_id, member_high_id) DO NOTHING
                RETURNING chat_room_id, name, member_low_id, member_high_id
            "#,
        )
        .bind(&name)
        .bind(pair.low())
        .bind(pair.high())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = inserted else {
            tx.rollback().await.map_err(AppError::TransactionError)?;
            let room = self.find_room_by_pair(pair).await?.ok_or_else(|| {
                AppError::NoRowsAffectedError("chat room vanished after a conflicting insert".into())
            })?;
            return Ok(FoundChatRoom {
                room,
                created: false,
            });
        };

        let res = sqlx::query(
            r#"
                INSERT INTO chat_members (chat_room_id, member_id)
                VALUES ($1, $2), ($1, $3)
            "#,
        )
        .bind(row.chat_room_id)
        .bind(pair.low())
        .bind(pair.high())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() != 2 {
            return Err(AppError::NoRowsAffectedError(
                "chat members have not been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(FoundChatRoom {
            room: ChatRoom::try_from(row)?,
            created: true,
        })
    }

    async fn find_room_by_id(&self, chat_room_id: ChatRoomId) -> AppResult<Option<ChatRoom>> {
        let row: Option<ChatRoomRow> = sqlx::query_as(
            r#"
                SELECT chat_room_id, name, member_low_id, member_high_id
                FROM chat_rooms
                WHERE chat_room_id = $1
            "#,
        )
        .bind(chat_room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(ChatRoom::try_from).transpose()
    }

    async fn create_message(&self, event: CreateChatMessage) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessageRow>(
            r#"
                INSERT INTO chat_messages (chat_room_id, member_id, content)
                VALUES ($1, $2, $3)
                RETURNING chat_message_id, chat_room_id, member_id, content, created_at
            "#,
        )
        .bind(event.chat_room_id)
        .bind(event.sent_by)
        .bind(&event.content)
        .fetch_one(self.db.inner_ref())
        .await
        .map(ChatMessage::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_messages(&self, chat_room_id: ChatRoomId) -> AppResult<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessageRow>(
            r#"
                SELECT chat_message_id, chat_room_id, member_id, content, created_at
                FROM chat_messages
                WHERE chat_room_id = $1
                ORDER BY created_at ASC, chat_message_id ASC
            "#,
        )
        .bind(chat_room_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(ChatMessage::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}

impl ChatRepositoryImpl {
    async fn find_nickname(&self, member_id: MemberId) -> AppResult<String> {
        sqlx::query_scalar("SELECT nickname FROM members WHERE member_id = $1")
            .bind(member_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .ok_or_else(|| AppError::EntityNotFound(format!("member {member_id} does not exist")))
    }

    async fn find_room_by_pair(&self, pair: MemberPair) -> AppResult<Option<ChatRoom>> {
        let row: Option<ChatRoomRow> = sqlx::query_as(
            r#"
                SELECT chat_room_id, name, member_low_id, member_high_id
                FROM chat_rooms
                WHERE member_low_id = $1 AND member_high_id = $2
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(ChatRoom::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count_rooms(pool: &sqlx::PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM chat_rooms")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_find_or_create_room_is_idempotent(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ChatRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let first = repo
            .find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(2), MemberId::new(1)))
            .await?;
        assert!(first.created);
        assert_eq!(first.room.name, "user2&user1");

        // 順序を入れ替えても同じルームが返り、名前は変わらない
        let second = repo
            .find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(1), MemberId::new(2)))
            .await?;
        assert!(!second.created);
        assert_eq!(second.room, first.room);
        assert_eq!(count_rooms(&pool).await, 1);

        let members: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_members WHERE chat_room_id = $1")
                .bind(first.room.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(members, 2);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_creation_yields_one_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ChatRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let (a, b) = tokio::join!(
            repo.find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(3), MemberId::new(1))),
            repo.find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(1), MemberId::new(3))),
        );
        let (a, b) = (a?, b?);
        assert_eq!(a.room.id, b.room.id);
        assert_eq!(count_rooms(&pool).await, 1);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_member_and_self_chat_are_rejected(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ChatRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let res = repo
            .find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(999), MemberId::new(1)))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let res = repo
            .find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(1), MemberId::new(1)))
            .await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));
        assert_eq!(count_rooms(&pool).await, 0);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_messages_are_listed_oldest_first(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ChatRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let room = repo
            .find_or_create_room(FindOrCreateChatRoom::new(MemberId::new(2), MemberId::new(1)))
            .await?
            .room;

        repo.create_message(CreateChatMessage::new(room.id, MemberId::new(1), "hello".into()))
            .await?;
        repo.create_message(CreateChatMessage::new(room.id, MemberId::new(2), "hi".into()))
            .await?;

        let messages = repo.find_messages(room.id).await?;
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi"]);
        Ok(())
    }
}
