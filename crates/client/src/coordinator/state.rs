use serde::Serialize;

use profiledeck_core::api::PageDescriptor;
use profiledeck_core::profile::Profile;

/// Snapshot of the list view published to observers.
///
/// `profiles` and `page` always come from the same response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub current_page: u32,
    pub search: String,
    pub profiles: Vec<Profile>,
    pub page: PageDescriptor,
    pub loading: bool,
}

impl ViewState {
    pub(crate) fn initial() -> Self {
        Self {
            current_page: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
