//! HTTP plumbing shared by every profile operation.

use serde::de::DeserializeOwned;

use profiledeck_core::api::{http_status_message, ErrorBody};

/// Message for a success response whose body does not match the schema.
pub const MALFORMED_RESPONSE: &str = "Malformed response";

/// Why a request did not produce a usable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// HTTP status, absent for transport failures.
    pub status: Option<u16>,
    pub message: String,
}

impl Failure {
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Thin wrapper over `reqwest::Client` bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Build a URL for an endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and parses a success body as `T`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Failure> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, "Request failed");
                return Err(Failure {
                    status: None,
                    message: err.to_string(),
                });
            }
        };

        handle_response(response).await
    }
}

/// Normalizes a response into the parsed body or a [`Failure`].
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Failure> {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            return Err(Failure {
                status: Some(status.as_u16()),
                message: err.to_string(),
            })
        }
    };

    if status.is_success() {
        serde_json::from_slice(&body).map_err(|err| {
            tracing::debug!(status = status.as_u16(), error = %err, "Malformed response body");
            Failure {
                status: Some(status.as_u16()),
                message: MALFORMED_RESPONSE.to_string(),
            }
        })
    } else {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| http_status_message(status.as_u16()));
        tracing::debug!(status = status.as_u16(), %message, "Server returned an error");
        Err(Failure {
            status: Some(status.as_u16()),
            message,
        })
    }
}
