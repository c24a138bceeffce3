//! Response shapes produced by the profile REST backend.
//!
//! Parsing into these types is the schema check at the API boundary: a
//! success body that does not match is reported as malformed instead of
//! being inspected field by field.

use serde::Deserialize;

use super::pagination::{PageDescriptor, ProfilePage};
use crate::profile::Profile;

/// `pagination` object of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPagination {
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub total_count: u64,
    pub limit: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

impl ServerPagination {
    /// Rebuild the descriptor from the raw counts.
    ///
    /// The server's own `totalPages` and flags are ignored so the
    /// descriptor invariants hold even when the server disagrees.
    pub fn to_descriptor(&self) -> PageDescriptor {
        PageDescriptor::new(self.current_page, self.total_count, self.limit)
    }
}

/// Body of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Profile>,
    pub pagination: ServerPagination,
}

impl ListResponse {
    pub fn into_page(self) -> ProfilePage {
        let page = self.pagination.to_descriptor();
        ProfilePage::new(self.data, page)
    }
}

/// Body of `GET /api/users` when only the profile array is needed.
///
/// Accepts both the paginated envelope and a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListBody {
    Paged(ListResponse),
    Plain(Vec<Profile>),
}

impl ListBody {
    pub fn into_profiles(self) -> Vec<Profile> {
        match self {
            ListBody::Paged(response) => response.data,
            ListBody::Plain(profiles) => profiles,
        }
    }
}

/// Body of `DELETE /api/users/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The server-supplied message, preferring `error` over `message`.
    pub fn into_message(self) -> Option<String> {
        let non_blank = |m: &String| !m.trim().is_empty();
        self.error
            .filter(non_blank)
            .or_else(|| self.message.filter(non_blank))
    }
}
