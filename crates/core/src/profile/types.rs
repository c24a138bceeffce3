use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_id, deserialize_optional_date, deserialize_optional_string};

/// A user profile as stored by the backend.
///
/// The client only ever holds transient copies; `id`, `created_at` and
/// `updated_at` are assigned by the server. `Default` is the empty
/// placeholder returned alongside failed results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Creates a profile with only the required fields set.
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets a specific ID for this profile (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_profile() {
        let json = r#"{
            "id": 7,
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "phoneNumber": "",
            "bio": "Analyst",
            "avatarUrl": null,
            "dateOfBirth": "1815-12-10T00:00:00.000Z",
            "location": "London",
            "createdAt": "2024-06-15T10:30:00Z",
            "updatedAt": "2024-06-15T10:30:00Z"
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.id, "7");
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.phone_number, None);
        assert_eq!(profile.bio.as_deref(), Some("Analyst"));
        assert_eq!(profile.avatar_url, None);
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1815, 12, 10));
        assert!(profile.created_at.is_some());
    }

    #[test]
    fn test_serialize_skips_unset_optionals() {
        let profile = Profile::new("Ada", "ada@example.com").with_id("1");
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"id": "1", "fullName": "Ada", "email": "ada@example.com"})
        );
    }

    #[test]
    fn test_cache_roundtrip_preserves_profile() {
        let profile = Profile::new("Ada", "ada@example.com")
            .with_id("1")
            .with_location("London")
            .with_date_of_birth(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());

        let bytes = serde_json::to_vec(&profile).unwrap();
        let back: Profile = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(profile, back);
    }

    #[test]
    fn test_default_is_empty_placeholder() {
        let profile = Profile::default();
        assert!(profile.id.is_empty());
        assert!(profile.full_name.is_empty());
        assert!(profile.email.is_empty());
    }
}
