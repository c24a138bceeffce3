//! Read operations as [`Operation`] values, so they can be cache-wrapped.

use std::sync::Arc;

use async_trait::async_trait;

use profiledeck_core::api::{ApiResult, ListBody, ListResponse, Operation, ProfilePage};
use profiledeck_core::profile::{ListProfilesQuery, Profile};

use super::transport::HttpTransport;

/// Page size requested by the unpaginated list.
pub const ALL_PROFILES_LIMIT: u32 = 1000;

/// Message reported when a single profile does not exist.
pub const NOT_FOUND_MESSAGE: &str = "User not found";

/// `GET /api/users?page&limit&search`
#[derive(Debug, Clone)]
pub struct ListProfiles {
    transport: Arc<HttpTransport>,
}

impl ListProfiles {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Operation for ListProfiles {
    type Args = ListProfilesQuery;
    type Output = ProfilePage;

    async fn call(&self, query: &ListProfilesQuery) -> ApiResult<ProfilePage> {
        tracing::debug!(page = query.page, limit = query.limit, search = ?query.search, "Listing profiles");
        let request = self
            .transport
            .client()
            .get(self.transport.url("/api/users"))
            .query(query);

        match self.transport.send::<ListResponse>(request).await {
            Ok(body) => ApiResult::ok(body.into_page(), ""),
            Err(failure) => ApiResult::failure(ProfilePage::empty(query.limit), failure.message),
        }
    }
}

/// `GET /api/users` with the largest page and no search.
#[derive(Debug, Clone)]
pub struct ListAllProfiles {
    transport: Arc<HttpTransport>,
}

impl ListAllProfiles {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Operation for ListAllProfiles {
    type Args = ();
    type Output = Vec<Profile>;

    async fn call(&self, _args: &()) -> ApiResult<Vec<Profile>> {
        tracing::debug!("Listing all profiles");
        let request = self
            .transport
            .client()
            .get(self.transport.url("/api/users"))
            .query(&ListProfilesQuery::new(1, ALL_PROFILES_LIMIT));

        match self.transport.send::<ListBody>(request).await {
            Ok(body) => ApiResult::ok(body.into_profiles(), ""),
            Err(failure) => ApiResult::failed(failure.message),
        }
    }
}

/// `GET /api/users/:id`
#[derive(Debug, Clone)]
pub struct GetProfile {
    transport: Arc<HttpTransport>,
}

impl GetProfile {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Operation for GetProfile {
    type Args = String;
    type Output = Option<Profile>;

    async fn call(&self, id: &String) -> ApiResult<Option<Profile>> {
        tracing::debug!(%id, "Fetching profile");
        let request = self
            .transport
            .client()
            .get(self.transport.url(&profile_path(id)));

        match self.transport.send::<Profile>(request).await {
            Ok(profile) => ApiResult::ok(Some(profile), ""),
            Err(failure) if failure.is_not_found() => ApiResult::failure(None, NOT_FOUND_MESSAGE),
            // Only a 404 leaves the slot empty.
            Err(failure) => ApiResult::failure(Some(Profile::default()), failure.message),
        }
    }
}

/// Path of a single profile resource, with the id percent-encoded.
pub(crate) fn profile_path(id: &str) -> String {
    format!("/api/users/{}", urlencoding::encode(id))
}
