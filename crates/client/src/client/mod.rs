//! Typed HTTP client for the profile REST API.

pub mod operations;
pub mod transport;

use std::sync::Arc;

use async_trait::async_trait;

use profiledeck_core::api::{
    ApiResult, DeleteResponse, Operation, ProfilePage, ProfileService,
};
use profiledeck_core::cache::{
    profile_key, profile_lists_pattern, GET_PROFILE_ENDPOINT, LIST_ALL_PROFILES_ENDPOINT,
    LIST_PROFILES_ENDPOINT,
};
use profiledeck_core::profile::{validate_profile_input, ListProfilesQuery, Profile, ProfileInput};

use crate::cache::{CacheStore, CachedOperation};
use operations::{profile_path, GetProfile, ListAllProfiles, ListProfiles};
use transport::HttpTransport;

type ListOp = Arc<dyn Operation<Args = ListProfilesQuery, Output = ProfilePage>>;
type ListAllOp = Arc<dyn Operation<Args = (), Output = Vec<Profile>>>;
type GetOp = Arc<dyn Operation<Args = String, Output = Option<Profile>>>;

/// HTTP client for the profile API.
///
/// Every call returns an [`ApiResult`]; nothing fails past this boundary.
/// When built with a cache, reads are served through [`CachedOperation`]
/// and successful mutations invalidate the affected entries before
/// returning.
#[derive(Clone)]
pub struct ProfileClient {
    transport: Arc<HttpTransport>,
    cache: Option<Arc<CacheStore>>,
    list: ListOp,
    list_all: ListAllOp,
    get: GetOp,
}

impl ProfileClient {
    /// Create a client that always hits the network.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::build(Arc::new(HttpTransport::new(base_url)), None)
    }

    /// Create a client whose reads go through `cache`.
    pub fn with_cache(base_url: impl Into<String>, cache: Arc<CacheStore>) -> Self {
        Self::build(Arc::new(HttpTransport::new(base_url)), Some(cache))
    }

    fn build(transport: Arc<HttpTransport>, cache: Option<Arc<CacheStore>>) -> Self {
        let list = ListProfiles::new(transport.clone());
        let list_all = ListAllProfiles::new(transport.clone());
        let get = GetProfile::new(transport.clone());

        let (list, list_all, get): (ListOp, ListAllOp, GetOp) = match &cache {
            Some(store) => (
                Arc::new(CachedOperation::new(list, LIST_PROFILES_ENDPOINT, store.clone())),
                Arc::new(CachedOperation::new(
                    list_all,
                    LIST_ALL_PROFILES_ENDPOINT,
                    store.clone(),
                )),
                Arc::new(CachedOperation::new(get, GET_PROFILE_ENDPOINT, store.clone())),
            ),
            None => (Arc::new(list), Arc::new(list_all), Arc::new(get)),
        };

        Self {
            transport,
            cache,
            list,
            list_all,
            get,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// The cache store, when reads are cached.
    pub fn cache(&self) -> Option<&Arc<CacheStore>> {
        self.cache.as_ref()
    }

    /// Drop cached list pages, plus the single-profile entry for `id`.
    fn invalidate_after_mutation(&self, id: Option<&str>) {
        let Some(cache) = &self.cache else {
            return;
        };
        cache.invalidate_pattern(&profile_lists_pattern());
        if let Some(id) = id {
            cache.invalidate_key(&profile_key(id));
        }
    }

    async fn write_profile(
        &self,
        request: reqwest::RequestBuilder,
        input: &ProfileInput,
        id: Option<&str>,
        verb: &'static str,
    ) -> ApiResult<Profile> {
        if let Err(err) = validate_profile_input(input) {
            return ApiResult::failed(err.to_string());
        }

        match self.transport.send::<Profile>(request.json(input)).await {
            Ok(profile) => {
                self.invalidate_after_mutation(id);
                tracing::debug!(id = %profile.id, "Profile {verb}");
                ApiResult::ok(profile, format!("Profile {verb} successfully"))
            }
            Err(failure) => ApiResult::failed(failure.message),
        }
    }
}

#[async_trait]
impl ProfileService for ProfileClient {
    async fn list_profiles(&self, query: &ListProfilesQuery) -> ApiResult<ProfilePage> {
        self.list.call(query).await
    }

    async fn list_all_profiles(&self) -> ApiResult<Vec<Profile>> {
        self.list_all.call(&()).await
    }

    async fn get_profile(&self, id: &str) -> ApiResult<Option<Profile>> {
        self.get.call(&id.to_string()).await
    }

    async fn create_profile(&self, input: &ProfileInput) -> ApiResult<Profile> {
        let request = self
            .transport
            .client()
            .post(self.transport.url("/api/users"));
        self.write_profile(request, input, None, "created").await
    }

    async fn update_profile(&self, id: &str, input: &ProfileInput) -> ApiResult<Profile> {
        let request = self
            .transport
            .client()
            .put(self.transport.url(&profile_path(id)));
        self.write_profile(request, input, Some(id), "updated").await
    }

    async fn delete_profile(&self, id: &str) -> ApiResult<bool> {
        let request = self
            .transport
            .client()
            .delete(self.transport.url(&profile_path(id)));

        match self.transport.send::<DeleteResponse>(request).await {
            Ok(body) => {
                self.invalidate_after_mutation(Some(id));
                tracing::debug!(%id, "Profile deleted");
                let message = if body.message.is_empty() {
                    "Profile deleted successfully".to_string()
                } else {
                    body.message
                };
                ApiResult::ok(true, message)
            }
            Err(failure) => ApiResult::failure(false, failure.message),
        }
    }
}

impl std::fmt::Debug for ProfileClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileClient")
            .field("base_url", &self.transport.base_url())
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
