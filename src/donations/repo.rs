use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    pub donor: Uuid,
    pub amount_cents: i64,
    pub message: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Donation {
    pub async fn create(
        db: &PgPool,
        donor: Uuid,
        amount_cents: i64,
        message: Option<&str>,
    ) -> anyhow::Result<Donation> {
        let donation = sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations (donor, amount_cents, message)
            VALUES ($1, $2, $3)
            RETURNING id, donor, amount_cents, message, created_at
            "#,
        )
        .bind(donor)
        .bind(amount_cents)
        .bind(message)
        .fetch_one(db)
        .await?;
        Ok(donation)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Donation>> {
        let donations = sqlx::query_as::<_, Donation>(
            r#"
            SELECT id, donor, amount_cents, message, created_at
            FROM donations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(donations)
    }
}
