//! API request types for profile operations.
//!
//! These types are shared between the HTTP client and the coordinator for
//! type-safe API communication. Pure data, no I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::Profile;

/// Request body for `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ProfileInput {
    /// Create a new request with the required fields.
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Copy the editable fields of an existing profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            bio: profile.bio.clone(),
            avatar_url: profile.avatar_url.clone(),
            date_of_birth: profile.date_of_birth,
            location: profile.location.clone(),
        }
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

/// Query parameters for `GET /api/users`.
///
/// Also serves as the cache key parameters for list results, so field order
/// and naming must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProfilesQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListProfilesQuery {
    /// Create a query for a page; page numbers below 1 are raised to 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: None,
        }
    }

    /// Set the search text. Blank text clears the filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_skips_unset_optionals() {
        let input = ProfileInput::new("Ada", "ada@example.com").with_location("London");
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "fullName": "Ada",
                "email": "ada@example.com",
                "location": "London"
            })
        );
    }

    #[test]
    fn test_input_from_profile_copies_editable_fields() {
        let dob = NaiveDate::from_ymd_opt(1990, 1, 2).unwrap();
        let profile = Profile::new("Ada", "ada@example.com")
            .with_id("99")
            .with_bio("bio")
            .with_date_of_birth(dob);

        let input = ProfileInput::from_profile(&profile);

        assert_eq!(input.full_name, "Ada");
        assert_eq!(input.bio.as_deref(), Some("bio"));
        assert_eq!(input.date_of_birth, Some(dob));
    }

    #[test]
    fn test_list_query_clamps_page() {
        let query = ListProfilesQuery::new(0, 20);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_list_query_blank_search_is_none() {
        assert_eq!(ListProfilesQuery::new(1, 20).with_search("   ").search, None);
        assert_eq!(
            ListProfilesQuery::new(1, 20).with_search(" ada ").search,
            Some("ada".to_string())
        );
    }
}
