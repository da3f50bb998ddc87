//! REST client for the RAG backend.
//!
//! One method per backend operation, each a single request/response
//! cycle against a fixed base URL — no retry, no explicit timeout beyond
//! the transport defaults. The client owns the two translations the wire
//! contract needs:
//!
//! - configuration records pass through [`crate::wire`] (field-name
//!   mapping, empty↔null substitution, whole-record defaulting), and
//! - "not configured yet" is normalized to `Ok(None)` rather than an
//!   error: `GET /config` answering 404, or the backend being
//!   unreachable, both mean "nothing stored".
//!
//! # Errors
//!
//! All other failures surface as [`ApiError`]: either the request never
//! produced a response ([`ApiError::Transport`]) or the server answered
//! with a non-success status ([`ApiError::Server`]), in which case any
//! JSON `{"detail": ...}` body is captured for display.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Configuration, Document};
use crate::wire::{self, ConfigEnvelope};

/// Base URL used when the settings file doesn't override it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

fn server_error_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!("server returned HTTP {}: {}", status, d),
        None => format!("server returned HTTP {}", status),
    }
}

/// Failure of a single backend operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, broken transfer).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status. `detail` carries
    /// the server-supplied message when the body had one.
    #[error("{}", server_error_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Server-supplied detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                detail: Some(d), ..
            } => Some(d.as_str()),
            _ => None,
        }
    }

    /// Best-available message for inline display: the server detail when
    /// present, else the transport error text, else the caller's
    /// fallback (tagged with the status so it stays diagnosable).
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                detail: Some(d), ..
            } if !d.is_empty() => d.clone(),
            ApiError::Transport(e) => e.to_string(),
            ApiError::Server { status, .. } => format!("{} (HTTP {})", fallback, status),
        }
    }
}

/// Response of a successful `POST /ingest`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub num_chunks: i64,
}

/// HTTP client bound to one backend deployment.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a document for ingestion and indexing.
    ///
    /// Sends the bytes as a multipart body under the field name `file`.
    /// The backend parses, chunks, and indexes the document and reports
    /// how many chunks it produced.
    pub async fn upload_document(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<IngestResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self
            .http
            .post(self.url("/ingest"))
            .multipart(form)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Write the whole draft back as the new configuration.
    ///
    /// Full replacement, no merge: every empty optional field is sent as
    /// an explicit null. The echoed body is not used.
    pub async fn save_configuration(&self, draft: &Configuration) -> Result<(), ApiError> {
        let envelope = ConfigEnvelope {
            configs: wire::to_wire(draft),
        };
        let resp = self
            .http
            .post(self.url("/config"))
            .json(&envelope)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Fetch the stored configuration, or `None` when nothing is stored.
    ///
    /// A 404 and an unreachable backend are both the distinguished
    /// "absent" outcome, not errors; callers keep their compiled
    /// defaults in that case. Any other non-success status propagates.
    pub async fn get_configuration(&self) -> Result<Option<Configuration>, ApiError> {
        let resp = match self.http.get(self.url("/config")).send().await {
            Ok(resp) => resp,
            Err(_) => return Ok(None),
        };
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check(resp).await?;
        let envelope: ConfigEnvelope = resp.json().await?;
        Ok(Some(wire::from_wire(envelope.configs)))
    }

    /// Fetch the full document list, in backend order.
    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let resp = self.http.get(self.url("/documents")).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Delete one document by id. A non-existent id surfaces as a
    /// [`ApiError::Server`] carrying the server's detail message.
    pub async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/documents/{}", id)))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ApiError::Server`], extracting the
/// JSON `detail` field when the body carries one (the backend's error
/// shape), or the raw body text otherwise.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
    Err(ApiError::Server {
        status: status.as_u16(),
        detail,
    })
}
