use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::Message;

#[derive(Debug, Clone)]
#[must_use]
pub struct MessageRepository {
    pub(super) connection: SqlitePool,
}

impl MessageRepository {
    #[instrument(skip(self, message_text), err(Debug))]
    pub async fn insert(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<Message, sqlx::Error> {
        let query = sqlx::query_as::<_, Message>(
            r"
                INSERT INTO messages (posted_by, message_text, time_posted_epoch)
                VALUES (?, ?, ?)
                RETURNING id, posted_by, message_text, time_posted_epoch
            ",
        );

        query
            .bind(posted_by)
            .bind(message_text)
            .bind(time_posted_epoch)
            .fetch_one(&self.connection)
            .await
            .inspect(|message| tracing::debug!(message_id = message.id, "Inserted new message"))
    }

    /// Inserts the message, or overwrites the row that already carries its id.
    #[instrument(skip_all, fields(message.id = message.id), err(Debug))]
    pub async fn save(&self, message: &Message) -> Result<Message, sqlx::Error> {
        let query = sqlx::query_as::<_, Message>(
            r"
                INSERT INTO messages (id, posted_by, message_text, time_posted_epoch)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE
                SET posted_by = excluded.posted_by,
                    message_text = excluded.message_text,
                    time_posted_epoch = excluded.time_posted_epoch
                RETURNING id, posted_by, message_text, time_posted_epoch
            ",
        );

        query
            .bind(message.id)
            .bind(message.posted_by)
            .bind(&message.message_text)
            .bind(message.time_posted_epoch)
            .fetch_one(&self.connection)
            .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn find_all(&self) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages ORDER BY id",
        )
        .fetch_all(&self.connection)
        .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn find_by_id(&self, message_id: i64) -> Result<Option<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages WHERE id = ?",
        )
        .bind(message_id)
        .fetch_optional(&self.connection)
        .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn find_by_posted_by(&self, account_id: i64) -> Result<Vec<Message>, sqlx::Error> {
        let query = sqlx::query_as::<_, Message>(
            r"
                SELECT id, posted_by, message_text, time_posted_epoch
                FROM messages
                WHERE posted_by = ?
                ORDER BY id
            ",
        );

        query
            .bind(account_id)
            .fetch_all(&self.connection)
            .await
            .inspect(|messages| tracing::trace!(count = messages.len(), "Found messages"))
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn exists_by_id(&self, message_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT EXISTS (SELECT 1 FROM messages WHERE id = ?)")
            .bind(message_id)
            .fetch_one(&self.connection)
            .await
            .map(|found| found != 0)
    }

    /// Returns `false` when no row carried `message_id`.
    #[instrument(skip(self), err(Debug))]
    pub async fn delete_by_id(&self, message_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(message_id)
            .execute(&self.connection)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
