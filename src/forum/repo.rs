use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub likes: Vec<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub author: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Thread {
    pub async fn create(
        db: &PgPool,
        author: Uuid,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Thread> {
        let thread = sqlx::query_as::<_, Thread>(
            r#"
            INSERT INTO forum_threads (title, content, author)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author, likes, created_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author)
        .fetch_one(db)
        .await?;
        Ok(thread)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Thread>> {
        let threads = sqlx::query_as::<_, Thread>(
            r#"
            SELECT id, title, content, author, likes, created_at
            FROM forum_threads
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(threads)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Thread>> {
        let thread = sqlx::query_as::<_, Thread>(
            r#"
            SELECT id, title, content, author, likes, created_at
            FROM forum_threads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(thread)
    }

    /// Add or remove the user's like in one statement; returns the updated
    /// like list, or None for an unknown thread. Toggling twice is a no-op.
    pub async fn toggle_like(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Vec<Uuid>>> {
        let likes: Option<(Vec<Uuid>,)> = sqlx::query_as(
            r#"
            UPDATE forum_threads SET
                likes = CASE
                    WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                    ELSE array_append(likes, $2)
                END
            WHERE id = $1
            RETURNING likes
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(likes.map(|l| l.0))
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM forum_threads WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl Comment {
    pub async fn create(
        db: &PgPool,
        thread_id: Uuid,
        author: Uuid,
        content: &str,
    ) -> anyhow::Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO forum_comments (thread_id, author, content)
            VALUES ($1, $2, $3)
            RETURNING id, thread_id, author, content, created_at
            "#,
        )
        .bind(thread_id)
        .bind(author)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(comment)
    }

    pub async fn list_for_thread(db: &PgPool, thread_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, thread_id, author, content, created_at
            FROM forum_comments
            WHERE thread_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(db)
        .await?;
        Ok(comments)
    }
}
