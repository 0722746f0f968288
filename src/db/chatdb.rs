// db/chatdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodels::{Chat, Message};

#[async_trait]
pub trait ChatExt {
    /// Get-or-create on the unordered pair. The unique index over
    /// (LEAST(user_one_id, user_two_id), GREATEST(...)) plus ON CONFLICT
    /// DO NOTHING makes concurrent first contact converge on one row.
    async fn create_or_get_chat(
        &self,
        user_one_id: Uuid,
        user_two_id: Uuid,
    ) -> Result<Chat, sqlx::Error>;

    async fn get_user_chats(&self, user_id: Uuid) -> Result<Vec<Chat>, sqlx::Error>;

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<Chat>, sqlx::Error>;

    async fn save_message<T: Into<String> + Send>(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        content: T,
    ) -> Result<Message, sqlx::Error>;

    async fn get_chat_messages(&self, chat_id: Uuid) -> Result<Vec<Message>, sqlx::Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn create_or_get_chat(
        &self,
        user_one_id: Uuid,
        user_two_id: Uuid,
    ) -> Result<Chat, sqlx::Error> {
        let existing = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, user_one_id, user_two_id, created_at
            FROM chats
            WHERE (user_one_id = $1 AND user_two_id = $2)
               OR (user_one_id = $2 AND user_two_id = $1)
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(chat) = existing {
            return Ok(chat);
        }

        sqlx::query(
            r#"
            INSERT INTO chats (user_one_id, user_two_id)
            VALUES ($1, $2)
            ON CONFLICT ((LEAST(user_one_id, user_two_id)), (GREATEST(user_one_id, user_two_id)))
            DO NOTHING
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .execute(&self.pool)
        .await?;

        // Either our insert landed or a concurrent one did; the row exists now.
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, user_one_id, user_two_id, created_at
            FROM chats
            WHERE (user_one_id = $1 AND user_two_id = $2)
               OR (user_one_id = $2 AND user_two_id = $1)
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_chats(&self, user_id: Uuid) -> Result<Vec<Chat>, sqlx::Error> {
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, user_one_id, user_two_id, created_at
            FROM chats
            WHERE user_one_id = $1 OR user_two_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<Chat>, sqlx::Error> {
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, user_one_id, user_two_id, created_at
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_message<T: Into<String> + Send>(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        content: T,
    ) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (chat_id, sender_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, chat_id, sender_id, content, created_at
            "#,
        )
        .bind(chat_id)
        .bind(sender_id)
        .bind(content.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_chat_messages(&self, chat_id: Uuid) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, chat_id, sender_id, content, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn chatdb_queries_compile() {
        let pool = PgPool::connect_lazy("postgres://localhost/messhub").unwrap();
        let db_client = DBClient::new(pool);

        let _ = db_client.create_or_get_chat(Uuid::nil(), Uuid::nil());
        let _ = db_client.get_chat_messages(Uuid::nil());
    }
}
