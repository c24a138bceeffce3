use serde::{Deserialize, Serialize};

/// Uniform outcome of every API client operation.
///
/// `data` is always present: on failure it holds the empty placeholder of
/// the expected shape, so callers never branch on a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub data: T,
    pub success: bool,
    pub message: String,
}

impl<T> ApiResult<T> {
    /// A successful result.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: message.into(),
        }
    }

    /// A failed result carrying `placeholder` as its data.
    pub fn failure(placeholder: T, message: impl Into<String>) -> Self {
        Self {
            data: placeholder,
            success: false,
            message: message.into(),
        }
    }

    /// Transform the data, keeping the success flag and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            data: f(self.data),
            success: self.success,
            message: self.message,
        }
    }
}

impl<T: Default> ApiResult<T> {
    /// A failed result whose data is `T::default()`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::failure(T::default(), message)
    }
}

/// Message used when the server does not supply one for a non-2xx status.
pub fn http_status_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}
