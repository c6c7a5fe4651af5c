//! HTTP access to the Twitch Helix API.
//!
//! [`HelixTransport`] is the seam every pipeline stage talks through; the
//! production implementation is [`HelixClient`], a thin wrapper around one
//! immutable `ureq` agent.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::ApiError;

pub const HELIX_BASE_URL: &str = "https://api.twitch.tv/helix/";
pub const USERS_ENDPOINT: &str = "users";
pub const FOLLOWS_ENDPOINT: &str = "users/follows";
pub const STREAMS_ENDPOINT: &str = "streams";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs one authenticated GET and returns the body of a successful
/// (status < 400) response.
pub trait HelixTransport {
    fn get(&self, endpoint: &'static str, query: &[(&str, &str)]) -> Result<String, ApiError>;
}

/// GET `endpoint` and decode the JSON body into `T`.
pub fn get_json<T, H>(
    transport: &H,
    endpoint: &'static str,
    query: &[(&str, &str)],
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    H: HelixTransport + ?Sized,
{
    let body = transport.get(endpoint, query)?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
}

pub struct HelixClient {
    agent: ureq::Agent,
    base_url: String,
    client_id: String,
    token: Option<String>,
}

impl HelixClient {
    pub fn new(client_id: impl Into<String>, token: Option<String>) -> Self {
        Self::with_base_url(HELIX_BASE_URL, client_id, token)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        // Status codes are classified by `get`, not by ureq.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        HelixClient {
            agent,
            base_url,
            client_id: client_id.into(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HelixTransport for HelixClient {
    fn get(&self, endpoint: &'static str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, params = query.len(), "GET");

        let mut request = self
            .agent
            .get(&url)
            .header("Client-Id", &self.client_id)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let request = request.query_pairs(query.iter().copied());

        let transport_err = |source: ureq::Error| ApiError::Transport {
            url: url.clone(),
            source: Box::new(source),
        };
        let mut response = request.call().map_err(transport_err)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_err)?;

        if status >= 400 {
            error!(%url, status, "helix request rejected");
            return Err(ApiError::Status { url, status, body });
        }
        Ok(body)
    }
}
