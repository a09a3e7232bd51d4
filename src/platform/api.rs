// LabelDesk - platform/api.rs
//
// HTTP client for the classifier backend.
//
// `ReviewApi` is the seam the app layer talks to; `HttpApi` implements it
// with a blocking reqwest client. Every call blocks the calling thread, so
// callers run them on background threads (see app::requests and
// app::log_poll).
//
// Error mapping:
//   - no response at all          -> ApiError::Transport
//   - non-2xx status              -> ApiError::Status (with the body's `error`
//                                    field when it has one)
//   - 2xx with an unexpected body -> ApiError::Decode
// Nothing is retried here.

use crate::core::model::{
    AcceptRequest, AcceptResponse, ErrorBody, PendingImage, RemoveRequest, Stats, UploadResponse,
};
use crate::util::constants::{API_PATH_SUFFIX, MAX_IMAGE_BYTES, UPLOAD_FIELD_NAME};
use crate::util::error::ApiError;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

/// Endpoint paths, relative to the API base.
pub mod endpoints {
    pub const IMAGES: &str = "/images";
    pub const UPLOAD: &str = "/upload";
    pub const ACCEPT: &str = "/accept";
    pub const REMOVE: &str = "/remove";
    pub const STATS: &str = "/stats";
    pub const LOGS: &str = "/logs";
}

/// Operations the review client needs from the backend.
pub trait ReviewApi: Send + Sync {
    /// `GET /images`: the pending set with predictions.
    fn list_images(&self) -> Result<Vec<PendingImage>, ApiError>;

    /// `POST /upload`: one multipart `files[]` part per path.
    fn upload(&self, paths: &[PathBuf]) -> Result<UploadResponse, ApiError>;

    /// `POST /accept`: commit the reviewed labels as one batch.
    fn accept(&self, request: &AcceptRequest) -> Result<AcceptResponse, ApiError>;

    /// `POST /remove`: discard one pending image.
    fn remove(&self, filename: &str) -> Result<(), ApiError>;

    /// `GET /stats`.
    fn stats(&self) -> Result<Stats, ApiError>;

    /// `GET /logs`: the backend's recent log lines.
    fn logs(&self) -> Result<Vec<String>, ApiError>;

    /// Raw bytes of an image; `url` may be relative to the server root.
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

/// reqwest-backed `ReviewApi`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    /// API base, e.g. `http://127.0.0.1:5000/api`.
    base: String,
    /// Server root that relative image URLs hang off.
    root: String,
}

impl HttpApi {
    /// Build a client for `base` (already normalised, no trailing slash).
    pub fn new(
        base: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: base.to_string(),
                message: format!("cannot build HTTP client: {e}"),
            })?;
        let base = base.trim_end_matches('/').to_string();
        let root = base
            .strip_suffix(API_PATH_SUFFIX)
            .unwrap_or(&base)
            .to_string();
        tracing::debug!(base = %base, root = %root, "HTTP API client created");
        Ok(Self { client, base, root })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Absolute URL for an image source as listed by the backend.
    pub fn resolve_url(&self, url: &str) -> String {
        resolve_against(&self.root, url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = send(path, self.client.get(self.endpoint_url(path)))?;
        decode_json(path, response)
    }
}

impl ReviewApi for HttpApi {
    fn list_images(&self) -> Result<Vec<PendingImage>, ApiError> {
        let images: Vec<PendingImage> = self.get_json(endpoints::IMAGES)?;
        tracing::debug!(count = images.len(), "Pending images fetched");
        Ok(images)
    }

    fn upload(&self, paths: &[PathBuf]) -> Result<UploadResponse, ApiError> {
        let mut form = multipart::Form::new();
        for path in paths {
            form = form
                .file(UPLOAD_FIELD_NAME, path)
                .map_err(|source| ApiError::File {
                    path: path.clone(),
                    source,
                })?;
        }
        let request = self
            .client
            .post(self.endpoint_url(endpoints::UPLOAD))
            .multipart(form);
        let response = send(endpoints::UPLOAD, request)?;
        decode_json(endpoints::UPLOAD, response)
    }

    fn accept(&self, request: &AcceptRequest) -> Result<AcceptResponse, ApiError> {
        let builder = self
            .client
            .post(self.endpoint_url(endpoints::ACCEPT))
            .json(request);
        let response = send(endpoints::ACCEPT, builder)?;
        decode_json(endpoints::ACCEPT, response)
    }

    fn remove(&self, filename: &str) -> Result<(), ApiError> {
        let body = RemoveRequest {
            filename: filename.to_string(),
        };
        let builder = self
            .client
            .post(self.endpoint_url(endpoints::REMOVE))
            .json(&body);
        send(endpoints::REMOVE, builder)?;
        Ok(())
    }

    fn stats(&self) -> Result<Stats, ApiError> {
        self.get_json(endpoints::STATS)
    }

    fn logs(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(endpoints::LOGS)
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let absolute = self.resolve_url(url);
        let response = send(url, self.client.get(&absolute))?;
        read_limited(url, response, MAX_IMAGE_BYTES)
    }
}

/// Resolve `url` against `root` unless it is already absolute.
pub fn resolve_against(root: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{root}{url}")
    } else {
        format!("{root}/{url}")
    }
}

/// Send a request, turning transport failures and non-2xx statuses into
/// `ApiError`s.
fn send(endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().map_err(|e| {
        tracing::warn!(endpoint, error = %e, "Request failed before a response arrived");
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.error)
        .filter(|m| !m.trim().is_empty());
    tracing::warn!(endpoint, status = status.as_u16(), message = ?message, "Request rejected");
    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        code: status.as_u16(),
        message,
    })
}

fn decode_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let body = response.text().map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Read a response body into memory, refusing anything over `max_bytes`.
fn read_limited(endpoint: &str, response: Response, max_bytes: u64) -> Result<Vec<u8>, ApiError> {
    let too_large = |len: u64| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("body of {len} bytes exceeds {max_bytes} bytes"),
    };
    if let Some(len) = response.content_length() {
        if len > max_bytes {
            return Err(too_large(len));
        }
    }
    let mut bytes = Vec::new();
    response
        .take(max_bytes + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
    if bytes.len() as u64 > max_bytes {
        return Err(too_large(bytes.len() as u64));
    }
    Ok(bytes)
}
