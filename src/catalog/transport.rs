/// Blocking HTTP transport shared by the Radarr and Sonarr clients.
///
/// Identification and credential headers are installed once as default
/// headers of the underlying client, so every request carries them.
use super::{CatalogError, CatalogKind};
use crate::config::{AccessCredentials, ServiceConfig};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("arr-request/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "x-api-key";
const ACCESS_CLIENT_ID_HEADER: &str = "cf-access-client-id";
const ACCESS_CLIENT_SECRET_HEADER: &str = "cf-access-client-secret";

/// Phrases the library managers use when rejecting a duplicate add
const DUPLICATE_MARKERS: &[&str] = &["already been added", "already exists"];

pub(super) struct ArrTransport {
    kind: CatalogKind,
    base_url: String,
    client: Client,
}

impl ArrTransport {
    /// Creates a transport for one library manager.
    pub fn new(
        kind: CatalogKind,
        service: &ServiceConfig,
        access: Option<&AccessCredentials>,
        timeout: Option<Duration>,
    ) -> Result<Self, CatalogError> {
        let headers = build_headers(kind, &service.api_key, access)?;

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| CatalogError::Transport {
            service: kind,
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            kind,
            base_url: service.base_url.clone(),
            client,
        })
    }

    /// GETs `path` and decodes the JSON response
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = self.url(path);
        debug!(service = %self.kind, url = %url, "GET");

        let response = self.send(self.client.get(&url).query(query), path)?;
        self.decode(response)
    }

    /// POSTs a JSON body to `path` and decodes the response if it can.
    ///
    /// Once the request succeeded an unreadable body yields `None`; only
    /// failures of the request itself are errors.
    pub fn post_json_lenient<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, CatalogError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(service = %self.kind, url = %url, "POST");

        let response = self.send(self.client.post(&url).json(body), path)?;
        match response.text() {
            Ok(text) => Ok(parse_lenient(self.kind, &text)),
            Err(e) => {
                debug!(service = %self.kind, error = %e, "response body unreadable");
                Ok(None)
            }
        }
    }

    /// POSTs a JSON body to `path`, ignoring the response body
    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), CatalogError> {
        let url = self.url(path);
        debug!(service = %self.kind, url = %url, "POST");

        self.send(self.client.post(&url).json(body), path)?;
        Ok(())
    }

    /// PUTs a JSON body to `path`, ignoring the response body
    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), CatalogError> {
        let url = self.url(path);
        debug!(service = %self.kind, url = %url, "PUT");

        self.send(self.client.put(&url).json(body), path)?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns non-success statuses into errors
    fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, CatalogError> {
        let response = request.send().map_err(|e| CatalogError::Transport {
            service: self.kind,
            message: if e.is_timeout() {
                format!("request timed out: {}", e)
            } else {
                e.to_string()
            },
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The body only serves the error message, so a failed read is not fatal
        let body = response.text().unwrap_or_default();
        debug!(service = %self.kind, status = status.as_u16(), body = %body, "request rejected");

        Err(classify_status(self.kind, status, path, &body))
    }

    fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, CatalogError> {
        let body = response.text().map_err(|e| CatalogError::Transport {
            service: self.kind,
            message: format!("Failed to read response body: {}", e),
        })?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Malformed {
            service: self.kind,
            message: e.to_string(),
        })
    }
}

fn parse_lenient<T: DeserializeOwned>(kind: CatalogKind, body: &str) -> Option<T> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(service = %kind, error = %e, "ignoring undecodable response body");
            None
        }
    }
}

/// Builds the headers sent with every request
fn build_headers(
    kind: CatalogKind,
    api_key: &str,
    access: Option<&AccessCredentials>,
) -> Result<HeaderMap, CatalogError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(API_KEY_HEADER),
        secret_value(kind, "API key", api_key)?,
    );

    if let Some(access) = access {
        headers.insert(
            HeaderName::from_static(ACCESS_CLIENT_ID_HEADER),
            secret_value(kind, "access client ID", &access.client_id)?,
        );
        headers.insert(
            HeaderName::from_static(ACCESS_CLIENT_SECRET_HEADER),
            secret_value(kind, "access client secret", &access.client_secret)?,
        );
    }

    Ok(headers)
}

fn secret_value(kind: CatalogKind, what: &str, value: &str) -> Result<HeaderValue, CatalogError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| CatalogError::Transport {
        service: kind,
        message: format!("The configured {} contains characters not allowed in a header", what),
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Maps a non-success status to the matching error
fn classify_status(kind: CatalogKind, status: StatusCode, path: &str, body: &str) -> CatalogError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::Unauthorized {
            service: kind,
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => CatalogError::NotFound {
            service: kind,
            path: path.to_string(),
        },
        StatusCode::CONFLICT => CatalogError::Conflict {
            service: kind,
            message: summarize_body(body, status),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY if mentions_duplicate(body) => {
            CatalogError::Conflict {
                service: kind,
                message: summarize_body(body, status),
            }
        }
        _ => CatalogError::Transport {
            service: kind,
            message: format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        },
    }
}

fn mentions_duplicate(body: &str) -> bool {
    let lowered = body.to_lowercase();
    DUPLICATE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Extracts the first validation message from an error body, if there is one
fn summarize_body(body: &str, status: StatusCode) -> String {
    // Validation failures come back as [{"propertyName": ..., "errorMessage": ...}]
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value {
            serde_json::Value::Array(items) => items
                .first()
                .and_then(|item| item.get("errorMessage"))
                .and_then(|m| m.as_str())
                .map(str::to_string),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        });

    message.unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
