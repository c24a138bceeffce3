//! Pagination and search coordinator.
//!
//! Ties the search text and page cursor to list fetches. Search input is
//! debounced; every fetch takes a ticket from a sequence, and a response
//! only updates the view if its ticket is still the latest one dispatched.
//! Mutations re-run the fetch for the current page and search on success.

mod sequence;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use profiledeck_core::api::{ApiResult, ProfileService, DEFAULT_PAGE_SIZE};
use profiledeck_core::profile::{validate_profile_input, ListProfilesQuery, Profile, ProfileError, ProfileInput};

pub use sequence::Sequence;
pub use state::{Notification, NotificationKind, ViewState};

/// Quiet window applied to search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

const NOTIFICATION_CAPACITY: usize = 32;

/// Drives list fetches from search text and page changes.
///
/// Cheap to clone; clones share state.
pub struct PaginationCoordinator<S: ?Sized> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: ?Sized> {
    service: Arc<S>,
    state: watch::Sender<ViewState>,
    notifications: broadcast::Sender<Notification>,
    fetches: Sequence,
    keystrokes: Sequence,
    debounce: Duration,
    page_size: u32,
}

impl<S: ?Sized> Clone for PaginationCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S> PaginationCoordinator<S>
where
    S: ProfileService + ?Sized + 'static,
{
    pub fn new(service: Arc<S>) -> Self {
        Self::with_options(service, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE)
    }

    pub fn with_options(service: Arc<S>, debounce: Duration, page_size: u32) -> Self {
        let (state, _) = watch::channel(ViewState::initial());
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                service,
                state,
                notifications,
                fetches: Sequence::default(),
                keystrokes: Sequence::default(),
                debounce,
                page_size: page_size.max(1),
            }),
        }
    }

    /// Observe view state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// Observe success and error notifications.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    /// The current view state.
    pub fn snapshot(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    /// Records new search text.
    ///
    /// The text is applied once no newer text arrives within the debounce
    /// window; applying it resets the page to 1 and fetches. The returned
    /// handle completes when this keystroke is either applied or dropped.
    pub fn set_search(&self, text: impl Into<String>) -> JoinHandle<()> {
        let text = text.into();
        let ticket = self.inner.keystrokes.next();
        let this = self.clone();

        tokio::spawn(async move {
            tokio::time::sleep(this.inner.debounce).await;
            if !this.inner.keystrokes.is_latest(ticket) {
                tracing::trace!(%text, "Search superseded");
                return;
            }
            tracing::debug!(%text, "Applying search");
            this.inner.state.send_modify(|s| {
                s.search = text;
                s.current_page = 1;
            });
            this.fetch().await;
        })
    }

    /// Fetches page `page` (raised to 1) with the current search text.
    pub async fn go_to_page(&self, page: u32) {
        let page = page.max(1);
        self.inner.state.send_modify(|s| s.current_page = page);
        self.fetch().await;
    }

    /// Fetches the current page with the current search text.
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// Validates and creates a profile, then refreshes the list.
    ///
    /// Validation errors are returned without any network call.
    pub async fn create(&self, input: &ProfileInput) -> Result<ApiResult<Profile>, ProfileError> {
        validate_profile_input(input)?;
        let result = self.inner.service.create_profile(input).await;
        self.after_mutation(&result).await;
        Ok(result)
    }

    /// Validates and updates a profile, then refreshes the list.
    pub async fn update(
        &self,
        id: &str,
        input: &ProfileInput,
    ) -> Result<ApiResult<Profile>, ProfileError> {
        validate_profile_input(input)?;
        let result = self.inner.service.update_profile(id, input).await;
        self.after_mutation(&result).await;
        Ok(result)
    }

    /// Deletes a profile, then refreshes the list.
    ///
    /// The page is not moved back when the delete empties it; the refreshed
    /// view is simply an empty page.
    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        let result = self.inner.service.delete_profile(id).await;
        self.after_mutation(&result).await;
        result
    }

    async fn after_mutation<T>(&self, result: &ApiResult<T>) {
        if result.success {
            self.notify(Notification::success(result.message.clone()));
            self.fetch().await;
        } else {
            self.notify(Notification::error(result.message.clone()));
        }
    }

    async fn fetch(&self) {
        let ticket = self.inner.fetches.next();
        let query = {
            let state = self.inner.state.borrow();
            ListProfilesQuery::new(state.current_page, self.inner.page_size)
                .with_search(state.search.clone())
        };
        self.inner.state.send_modify(|s| s.loading = true);

        tracing::debug!(ticket, page = query.page, search = ?query.search, "Fetching page");
        let result = self.inner.service.list_profiles(&query).await;

        if !self.inner.fetches.is_latest(ticket) {
            tracing::debug!(ticket, "Discarding superseded page response");
            return;
        }

        if result.success {
            self.inner.state.send_modify(|s| {
                s.profiles = result.data.profiles;
                s.page = result.data.page;
                s.loading = false;
            });
        } else {
            self.inner.state.send_modify(|s| s.loading = false);
            self.notify(Notification::error(result.message));
        }
    }

    fn notify(&self, notification: Notification) {
        // No subscribers is fine.
        let _ = self.inner.notifications.send(notification);
    }
}
