use serde::Deserialize;

use crate::users::repo::{ContactInfo, EducationRecord, PersonalDetails, WorkExperience};

/// Partial profile update; absent sections are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub personal_details: Option<PersonalDetails>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub education_history: Option<Vec<EducationRecord>>,
    #[serde(default)]
    pub work_experience: Option<Vec<WorkExperience>>,
    #[serde(default)]
    pub role_details: Option<serde_json::Value>,
}
