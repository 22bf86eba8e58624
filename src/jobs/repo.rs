use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::jobs::dto::UpdateJobRequest;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub apply_url: Option<String>,
    pub posted_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Job {
    pub async fn create(
        db: &PgPool,
        posted_by: Uuid,
        title: &str,
        company: &str,
        location: Option<&str>,
        description: Option<&str>,
        apply_url: Option<&str>,
    ) -> anyhow::Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, company, location, description, apply_url, posted_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, company, location, description, apply_url, posted_by, created_at
            "#,
        )
        .bind(title)
        .bind(company)
        .bind(location)
        .bind(description)
        .bind(apply_url)
        .bind(posted_by)
        .fetch_one(db)
        .await?;
        Ok(job)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company, location, description, apply_url, posted_by, created_at
            FROM jobs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(jobs)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company, location, description, apply_url, posted_by, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(job)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        req: &UpdateJobRequest,
    ) -> anyhow::Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                apply_url = COALESCE($6, apply_url)
            WHERE id = $1
            RETURNING id, title, company, location, description, apply_url, posted_by, created_at
            "#,
        )
        .bind(id)
        .bind(req.title.as_deref())
        .bind(req.company.as_deref())
        .bind(req.location.as_deref())
        .bind(req.description.as_deref())
        .bind(req.apply_url.as_deref())
        .fetch_optional(db)
        .await?;
        Ok(job)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
