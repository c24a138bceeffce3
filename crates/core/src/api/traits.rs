use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::pagination::ProfilePage;
use super::result::ApiResult;
use crate::profile::{ListProfilesQuery, Profile, ProfileInput};

/// A single asynchronous data-fetching operation.
///
/// This is the seam the cache decorator wraps: anything implementing it can
/// be served from cache, as long as its arguments serialize into a stable
/// cache key and its output survives a JSON round trip.
#[async_trait]
pub trait Operation: Send + Sync {
    type Args: Serialize + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;

    async fn call(&self, args: &Self::Args) -> ApiResult<Self::Output>;
}

/// The profile operations the coordinator drives.
///
/// Implementations never fail past their boundary: every outcome is an
/// [`ApiResult`].
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// One page of profiles, optionally filtered by search text.
    async fn list_profiles(&self, query: &ListProfilesQuery) -> ApiResult<ProfilePage>;

    /// Every profile, without pagination.
    async fn list_all_profiles(&self) -> ApiResult<Vec<Profile>>;

    /// A single profile; `data` is `None` when it does not exist, and an
    /// empty profile on any other failure.
    async fn get_profile(&self, id: &str) -> ApiResult<Option<Profile>>;

    async fn create_profile(&self, input: &ProfileInput) -> ApiResult<Profile>;

    async fn update_profile(&self, id: &str, input: &ProfileInput) -> ApiResult<Profile>;

    /// `data` mirrors `success`.
    async fn delete_profile(&self, id: &str) -> ApiResult<bool>;
}
