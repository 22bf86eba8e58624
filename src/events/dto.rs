use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_minimal_body() {
        let body = r#"{"title":"Homecoming 2026","startDate":"2026-10-03T18:00:00Z"}"#;
        let req: CreateEventRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.title, "Homecoming 2026");
        assert!(req.description.is_none());
        assert!(req.end_date.is_none());
    }

    #[test]
    fn update_request_defaults_to_no_changes() {
        let req: UpdateEventRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert!(req.start_date.is_none());
    }
}
