//! Privacy-filtered profile views.
//!
//! Four flags control which profile sections other users can see. Stored
//! settings are partial: a flag that was never written falls back to its
//! default on read, while an explicit `false` sticks. Filtering is a pure
//! total function over a user record; inclusion is all-or-nothing per
//! section, never per-field inside a list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::repo::{EducationRecord, PersonalDetails, User, UserType, WorkExperience};

/// Fully-populated flag set, as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub show_email: bool,
    pub show_phone: bool,
    pub show_work_experience: bool,
    pub show_education_history: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            show_email: true,
            show_phone: false,
            show_work_experience: true,
            show_education_history: true,
        }
    }
}

/// Partial flag overrides as stored and as accepted in update bodies.
/// Absent keys mean "no opinion".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_phone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_work_experience: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_education_history: Option<bool>,
}

impl PrivacyOverrides {
    /// Merge the stored overrides over the default flag set (read path).
    pub fn backfilled(self) -> PrivacySettings {
        let defaults = PrivacySettings::default();
        PrivacySettings {
            show_email: self.show_email.unwrap_or(defaults.show_email),
            show_phone: self.show_phone.unwrap_or(defaults.show_phone),
            show_work_experience: self
                .show_work_experience
                .unwrap_or(defaults.show_work_experience),
            show_education_history: self
                .show_education_history
                .unwrap_or(defaults.show_education_history),
        }
    }

    /// Merge an update over the existing stored overrides (write path).
    /// Supplied keys win; untouched keys keep their stored value, which may
    /// still be "absent".
    pub fn merged_with(self, update: PrivacyOverrides) -> PrivacyOverrides {
        PrivacyOverrides {
            show_email: update.show_email.or(self.show_email),
            show_phone: update.show_phone.or(self.show_phone),
            show_work_experience: update.show_work_experience.or(self.show_work_experience),
            show_education_history: update
                .show_education_history
                .or(self.show_education_history),
        }
    }
}

/// Contact section of a filtered view; only present when at least one of
/// email/phone is visible.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Redacted view of a user record, safe to show to other members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredUser {
    pub id: Uuid,
    pub user_type: UserType,
    pub personal_details: PersonalDetails,
    pub privacy_settings: PrivacySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<FilteredContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<WorkExperience>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_history: Option<Vec<EducationRecord>>,
}

/// Derive the redacted view of a user from its privacy flags.
pub fn filter_user(user: &User) -> FilteredUser {
    let flags = user.privacy_flags();

    let mut contact_info = None;
    if flags.show_email {
        contact_info = Some(FilteredContactInfo {
            email: Some(user.contact_info.email.clone()),
            phone: None,
        });
    }
    if flags.show_phone {
        let contact = contact_info.get_or_insert(FilteredContactInfo {
            email: None,
            phone: None,
        });
        contact.phone = user.contact_info.phone.clone();
    }

    FilteredUser {
        id: user.id,
        user_type: user.user_type,
        personal_details: user.personal_details.0.clone(),
        privacy_settings: flags,
        contact_info,
        work_experience: flags
            .show_work_experience
            .then(|| user.work_experience.0.clone()),
        education_history: flags
            .show_education_history
            .then(|| user.education_history.0.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::ContactInfo;
    use sqlx::types::Json;
    use time::OffsetDateTime;

    fn sample_user(overrides: Option<PrivacyOverrides>) -> User {
        User {
            id: Uuid::new_v4(),
            user_type: UserType::Alumni,
            personal_details: Json(PersonalDetails {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                profile_picture: None,
            }),
            contact_info: Json(ContactInfo {
                email: "ada@alumni.example.edu".into(),
                phone: Some("+44 1234 567890".into()),
                address: Some("London".into()),
            }),
            education_history: Json(vec![EducationRecord {
                institution_name: "University of London".into(),
                degree: Some("BSc".into()),
                department: Some("Mathematics".into()),
                programme: None,
                year_of_graduation: Some(1833),
                activities: vec!["Analytical Engine Society".into()],
            }]),
            work_experience: Json(vec![WorkExperience {
                company_name: "Babbage & Co".into(),
                position: Some("Analyst".into()),
                start_date: Some("1842-01-01".into()),
                end_date: None,
                description: None,
                skills: vec!["programming".into()],
            }]),
            role_details: None,
            privacy_settings: overrides.map(Json),
            password_hash: "$argon2id$fake".into(),
            reset_password_token: None,
            reset_password_expires: None,
            friends: vec![],
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn all(value: bool) -> PrivacyOverrides {
        PrivacyOverrides {
            show_email: Some(value),
            show_phone: Some(value),
            show_work_experience: Some(value),
            show_education_history: Some(value),
        }
    }

    #[test]
    fn all_flags_true_is_superset_of_all_flags_false() {
        let open = filter_user(&sample_user(Some(all(true))));
        let closed = filter_user(&sample_user(Some(all(false))));

        let contact = open.contact_info.expect("contact visible");
        assert!(contact.email.is_some());
        assert!(contact.phone.is_some());
        assert!(open.work_experience.is_some());
        assert!(open.education_history.is_some());

        assert!(closed.contact_info.is_none());
        assert!(closed.work_experience.is_none());
        assert!(closed.education_history.is_none());
    }

    #[test]
    fn filtered_view_always_keeps_identity_sections() {
        let view = filter_user(&sample_user(Some(all(false))));
        assert_eq!(view.user_type, UserType::Alumni);
        assert_eq!(view.personal_details.first_name, "Ada");
        assert_eq!(view.privacy_settings, all(false).backfilled());
    }

    #[test]
    fn phone_alone_creates_contact_info_without_email() {
        let overrides = PrivacyOverrides {
            show_email: Some(false),
            show_phone: Some(true),
            ..Default::default()
        };
        let view = filter_user(&sample_user(Some(overrides)));
        let contact = view.contact_info.expect("contact created for phone");
        assert!(contact.email.is_none());
        assert_eq!(contact.phone.as_deref(), Some("+44 1234 567890"));
    }

    #[test]
    fn defaults_apply_when_no_settings_stored() {
        let view = filter_user(&sample_user(None));
        // defaults: email yes, phone no, both histories yes
        let contact = view.contact_info.expect("email visible by default");
        assert!(contact.email.is_some());
        assert!(contact.phone.is_none());
        assert!(view.work_experience.is_some());
        assert!(view.education_history.is_some());
    }

    #[test]
    fn included_lists_are_never_partially_redacted() {
        let view = filter_user(&sample_user(Some(all(true))));
        let work = view.work_experience.expect("work visible");
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].company_name, "Babbage & Co");
        assert_eq!(work[0].skills, vec!["programming".to_string()]);
    }

    #[test]
    fn backfill_returns_exact_default_set() {
        let merged = PrivacyOverrides::default().backfilled();
        assert_eq!(
            merged,
            PrivacySettings {
                show_email: true,
                show_phone: false,
                show_work_experience: true,
                show_education_history: true,
            }
        );
    }

    #[test]
    fn explicit_false_overrides_default_on_read() {
        let stored = PrivacyOverrides {
            show_email: Some(false),
            ..Default::default()
        };
        let merged = stored.backfilled();
        assert!(!merged.show_email);
        assert!(merged.show_work_experience);
    }

    #[test]
    fn write_merge_preserves_untouched_flags() {
        // other flags sit at non-default values
        let stored = PrivacyOverrides {
            show_email: Some(false),
            show_work_experience: Some(false),
            ..Default::default()
        };
        let update = PrivacyOverrides {
            show_phone: Some(true),
            ..Default::default()
        };
        let merged = stored.merged_with(update);
        assert_eq!(merged.show_email, Some(false));
        assert_eq!(merged.show_work_experience, Some(false));
        assert_eq!(merged.show_phone, Some(true));
        assert_eq!(merged.show_education_history, None);
    }

    #[test]
    fn write_merge_is_idempotent() {
        let stored = PrivacyOverrides {
            show_email: Some(false),
            ..Default::default()
        };
        let update = PrivacyOverrides {
            show_phone: Some(true),
            show_email: Some(true),
            ..Default::default()
        };
        let once = stored.merged_with(update);
        let twice = once.merged_with(update);
        assert_eq!(once, twice);
    }

    #[test]
    fn write_merge_layers_over_existing_not_defaults() {
        // show_phone was never written; updating show_email must not
        // materialize a stored value for it
        let stored = PrivacyOverrides::default();
        let update = PrivacyOverrides {
            show_email: Some(false),
            ..Default::default()
        };
        let merged = stored.merged_with(update);
        assert_eq!(merged.show_phone, None);
        // ... but the backfilled view still shows the default
        assert!(!merged.backfilled().show_phone);
        assert!(!merged.backfilled().show_email);
    }

    #[test]
    fn overrides_deserialize_from_partial_json() {
        let parsed: PrivacyOverrides = serde_json::from_str(r#"{"showEmail":false}"#).unwrap();
        assert_eq!(parsed.show_email, Some(false));
        assert_eq!(parsed.show_phone, None);

        let empty: PrivacyOverrides = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PrivacyOverrides::default());
    }

    #[test]
    fn settings_serialize_with_wire_field_names() {
        let json = serde_json::to_value(PrivacySettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "showEmail": true,
                "showPhone": false,
                "showWorkExperience": true,
                "showEducationHistory": true,
            })
        );
    }

    #[test]
    fn hidden_sections_are_absent_from_serialized_view() {
        let view = filter_user(&sample_user(Some(all(false))));
        let json = serde_json::to_value(&view).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("contactInfo"));
        assert!(!obj.contains_key("workExperience"));
        assert!(!obj.contains_key("educationHistory"));
        assert!(obj.contains_key("personalDetails"));
        assert!(obj.contains_key("privacySettings"));
    }
}
