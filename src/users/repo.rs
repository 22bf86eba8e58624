use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::dto::UpdateProfileRequest;
use crate::users::privacy::PrivacyOverrides;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Alumni,
    Admin,
    Faculty,
    Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub institution_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_graduation: Option<i32>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    // ISO-8601 date strings; the histories are schema-flexible documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub user_type: UserType,
    pub personal_details: Json<PersonalDetails>,
    pub contact_info: Json<ContactInfo>,
    pub education_history: Json<Vec<EducationRecord>>,
    pub work_experience: Json<Vec<WorkExperience>>,
    pub role_details: Option<Json<serde_json::Value>>,
    pub privacy_settings: Option<Json<PrivacyOverrides>>,
    pub password_hash: String,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<OffsetDateTime>,
    pub friends: Vec<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    /// The stored overrides merged over the default flag set.
    pub fn privacy_flags(&self) -> crate::users::privacy::PrivacySettings {
        self.privacy_settings
            .as_ref()
            .map(|j| j.0)
            .unwrap_or_default()
            .backfilled()
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_type, personal_details, contact_info, education_history,
                   work_experience, role_details, privacy_settings, password_hash,
                   reset_password_token, reset_password_expires, friends, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by email. Emails are stored lowercase.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_type, personal_details, contact_info, education_history,
                   work_experience, role_details, privacy_settings, password_hash,
                   reset_password_token, reset_password_expires, friends, created_at, updated_at
            FROM users
            WHERE contact_info->>'email' = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_type, personal_details, contact_info, education_history,
                   work_experience, role_details, privacy_settings, password_hash,
                   reset_password_token, reset_password_expires, friends, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Create a new alumni user with hashed password.
    pub async fn create(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let personal = Json(PersonalDetails {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            profile_picture: None,
        });
        let contact = Json(ContactInfo {
            email: email.to_string(),
            phone: None,
            address: None,
        });
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (personal_details, contact_info, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, user_type, personal_details, contact_info, education_history,
                      work_experience, role_details, privacy_settings, password_hash,
                      reset_password_token, reset_password_expires, friends, created_at, updated_at
            "#,
        )
        .bind(personal)
        .bind(contact)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Partial profile update; absent sections keep their stored value.
    /// Returns None when the id does not resolve.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                personal_details = COALESCE($2, personal_details),
                contact_info = COALESCE($3, contact_info),
                education_history = COALESCE($4, education_history),
                work_experience = COALESCE($5, work_experience),
                role_details = COALESCE($6, role_details),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_type, personal_details, contact_info, education_history,
                      work_experience, role_details, privacy_settings, password_hash,
                      reset_password_token, reset_password_expires, friends, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(req.personal_details.clone().map(Json))
        .bind(req.contact_info.clone().map(Json))
        .bind(req.education_history.clone().map(Json))
        .bind(req.work_experience.clone().map(Json))
        .bind(req.role_details.clone().map(Json))
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Persist the merged privacy overrides. Returns false when the id does
    /// not resolve (last-write-wins under concurrent updates).
    pub async fn set_privacy_overrides(
        db: &PgPool,
        id: Uuid,
        overrides: &PrivacyOverrides,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET privacy_settings = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(*overrides))
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
