//! HTTP client for the compare-commits endpoint.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::core::{Change, CompareForm, CredentialProvider};

/// Path of the compare endpoint, relative to the backend base URL.
pub const COMPARE_ENDPOINT: &str = "/api/compare-commits";

/// Shown when no access token is available.
pub const MISSING_TOKEN_MESSAGE: &str = "Access token is missing.";

/// Shown when a request fails without a backend-supplied message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while comparing commits.";

/// Errors from a comparison request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompareError {
    /// No access token available; no request was sent.
    #[error("Access token is missing.")]
    MissingToken,
    /// Backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Backend {
        /// HTTP status code.
        status: u16,
        /// `error.message` from the response body, if present.
        message: Option<String>,
    },
    /// Request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Success response whose body is not a change list.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
    /// Configured base URL cannot be turned into an endpoint URL.
    #[error("invalid backend url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The configured base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl CompareError {
    /// Message for the error region: the backend's own message when it sent
    /// one, the missing-token text, or the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            CompareError::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            CompareError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Something that can answer a comparison for a given form and token.
pub trait CompareBackend: Send {
    /// Fetch the change list between the form's two commits.
    fn compare(&self, form: &CompareForm, token: &str) -> Result<Vec<Change>, CompareError>;
}

/// Success body of the compare endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareResponse {
    /// Changed files, in backend order.
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// Pull `error.message` out of an error response body.
///
/// Returns `None` for non-JSON bodies, bodies without the nested field, and
/// empty messages.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?;
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Build the endpoint URL from a base URL, keeping any path prefix.
pub fn endpoint_url(base_url: &str) -> Result<Url, CompareError> {
    let invalid = |reason: String| CompareError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}{}", trimmed, COMPARE_ENDPOINT))
        .map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {:?}", other))),
    }
}

/// Blocking reqwest client bound to one backend.
#[derive(Debug, Clone)]
pub struct CompareClient {
    http: Client,
    endpoint: Url,
}

impl CompareClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, CompareError> {
        let endpoint = endpoint_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(concat!("commitdiff/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Create a client that sends through a caller-configured reqwest client.
    pub fn with_client(base_url: &str, http: Client) -> Result<Self, CompareError> {
        Ok(Self {
            http,
            endpoint: endpoint_url(base_url)?,
        })
    }

    /// Fully-qualified endpoint URL (without query).
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CompareBackend for CompareClient {
    fn compare(&self, form: &CompareForm, token: &str) -> Result<Vec<Change>, CompareError> {
        let _timer = crate::metrics::Timer::start("compare_request");
        log::debug!(
            "GET {} workspace={} repoSlug={} fromCommit={} toCommit={}",
            self.endpoint,
            form.workspace,
            form.repo_slug,
            form.from_commit,
            form.to_commit
        );

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&form.query_pairs())
            .bearer_auth(token)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // A body we cannot read is treated like one without a message.
            let body = response.text().unwrap_or_default();
            return Err(CompareError::Backend {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let body = response.text()?;
        let parsed: CompareResponse = serde_json::from_str(&body)
            .map_err(|e| CompareError::InvalidResponse(e.to_string()))?;

        log::debug!("compare returned {} changes", parsed.changes.len());
        Ok(parsed.changes)
    }
}

/// Run one comparison: resolve the token, then ask the backend.
///
/// Fails with [`CompareError::MissingToken`] before touching the backend when
/// the provider has no token.
pub fn compare_commits(
    backend: &dyn CompareBackend,
    credentials: &dyn CredentialProvider,
    form: &CompareForm,
) -> Result<Vec<Change>, CompareError> {
    let token = credentials
        .access_token()
        .ok_or(CompareError::MissingToken)?;
    backend.compare(form, &token)
}
