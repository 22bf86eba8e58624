use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::events::dto::UpdateEventRequest;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub organizer: Uuid,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Event {
    pub async fn create(
        db: &PgPool,
        organizer: Uuid,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        start_date: OffsetDateTime,
        end_date: Option<OffsetDateTime>,
        image_url: Option<&str>,
    ) -> anyhow::Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, start_date, end_date, organizer, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, location, start_date, end_date, organizer, image_url, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(start_date)
        .bind(end_date)
        .bind(organizer)
        .bind(image_url)
        .fetch_one(db)
        .await?;
        Ok(event)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_date, end_date, organizer, image_url, created_at
            FROM events
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(events)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_date, end_date, organizer, image_url, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(event)
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        req: &UpdateEventRequest,
    ) -> anyhow::Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                image_url = COALESCE($7, image_url)
            WHERE id = $1
            RETURNING id, title, description, location, start_date, end_date, organizer, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(req.title.as_deref())
        .bind(req.description.as_deref())
        .bind(req.location.as_deref())
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.image_url.as_deref())
        .fetch_optional(db)
        .await?;
        Ok(event)
    }

    /// Delete an event, returning its title for the cancellation notice.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<Option<String>> {
        let title: Option<(String,)> = sqlx::query_as(
            r#"
            DELETE FROM events
            WHERE id = $1
            RETURNING title
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(title.map(|t| t.0))
    }

    pub async fn list_past(db: &PgPool) -> anyhow::Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_date, end_date, organizer, image_url, created_at
            FROM events
            WHERE start_date < now()
            ORDER BY start_date DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(events)
    }

    pub async fn list_upcoming(db: &PgPool) -> anyhow::Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, start_date, end_date, organizer, image_url, created_at
            FROM events
            WHERE start_date >= now()
            ORDER BY start_date ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(events)
    }
}
