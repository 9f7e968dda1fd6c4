use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::MemberId,
    member::{event::CreateMember, Member},
    role::Role,
};
use kernel::repository::member::MemberRepository;
use shared::error::{AppError, AppResult};

use super::password::hash_password;
use crate::database::{is_unique_violation, model::member::MemberRow, ConnectionPool};

#[derive(new)]
pub struct MemberRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MemberRepository for MemberRepositoryImpl {
    async fn create(&self, event: CreateMember) -> AppResult<Member> {
        let password_hash = hash_password(event.password.clone()).await?;
        let row: MemberRow = sqlx::query_as(
            r#"
                INSERT INTO members (email, password_hash, nickname, role)
                VALUES ($1, $2, $3, $4)
                RETURNING member_id, email, nickname, role
            "#,
        )
        .bind(&event.email)
        .bind(password_hash)
        .bind(&event.nickname)
        .bind(Role::User.as_ref())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::UnprocessableEntity(format!("email {} is already registered", event.email))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        Member::try_from(row)
    }

    async fn find_current_member(&self, member_id: MemberId) -> AppResult<Option<Member>> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
                SELECT member_id, email, nickname, role
                FROM members
                WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Member::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_member(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = MemberRepositoryImpl::new(ConnectionPool::new(pool));

        let member = repo
            .create(CreateMember::new(
                "test@example.com".into(),
                "test1234".into(),
                "tester".into(),
            ))
            .await?;
        assert_eq!(member.email, "test@example.com");
        assert_eq!(member.nickname, "tester");
        assert_eq!(member.role, Role::User);

        let found = repo.find_current_member(member.id).await?;
        assert_eq!(found, Some(member));

        let dup = repo
            .create(CreateMember::new(
                "test@example.com".into(),
                "other".into(),
                "other".into(),
            ))
            .await;
        assert!(matches!(dup, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }
}
