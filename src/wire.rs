//! Configuration wire format.
//!
//! The backend stores the configuration as a flat `{"configs": {...}}`
//! envelope of nullable snake_case strings. This module is the single
//! place where draft fields are mapped to and from that envelope:
//!
//! - On save, every optional field that is empty in the draft is sent as
//!   an explicit JSON `null`, and the whole record replaces whatever the
//!   backend holds (no merge).
//! - On load, [`from_wire`] applies the compiled-in fallback for every
//!   missing or empty core field in one pass, and maps absent optional
//!   fields back to empty strings.

use serde::{Deserialize, Serialize};

use crate::models::{Configuration, DatabaseBackend, DocumentSource, ProviderSelection, VectorStore};

/// The flat configuration record as it travels over HTTP. Any field may
/// be null or missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireConfig {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub vector_store: Option<String>,
    #[serde(default)]
    pub pgvector_url: Option<String>,
    #[serde(default)]
    pub document_source: Option<String>,
    #[serde(default)]
    pub sharepoint_site: Option<String>,
    #[serde(default)]
    pub sharepoint_username: Option<String>,
    #[serde(default)]
    pub sharepoint_password: Option<String>,
    #[serde(default)]
    pub embedding_provider: Option<String>,
    #[serde(default)]
    pub embedding_model: Option<String>,
    #[serde(default)]
    pub embedding_api_key: Option<String>,
    #[serde(default)]
    pub reranking_provider: Option<String>,
    #[serde(default)]
    pub reranking_model: Option<String>,
    #[serde(default)]
    pub reranking_api_key: Option<String>,
    #[serde(default)]
    pub llm_provider: Option<String>,
    #[serde(default)]
    pub llm_model: Option<String>,
    #[serde(default)]
    pub llm_api_key: Option<String>,
}

/// The `{"configs": ...}` envelope used by `GET /config` and `POST /config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigEnvelope {
    #[serde(default)]
    pub configs: WireConfig,
}

/// Empty string → absent value, for optional wire fields.
fn opt(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Absent value → empty string, for optional draft fields.
fn text(v: Option<String>) -> String {
    v.unwrap_or_default()
}

/// Missing or empty → fallback, for core fields with compiled defaults.
fn pick(v: Option<String>, fallback: &str) -> String {
    match v {
        Some(s) if !s.is_empty() => s,
        _ => fallback.to_string(),
    }
}

/// Map the draft to the wire record sent as the full replacement body.
///
/// Selector and provider/model fields travel verbatim; optional fields
/// become explicit nulls when empty.
pub fn to_wire(cfg: &Configuration) -> WireConfig {
    WireConfig {
        database: Some(cfg.database.as_str().to_string()),
        postgres_url: opt(&cfg.postgres_url),
        vector_store: Some(cfg.vector_store.as_str().to_string()),
        pgvector_url: opt(&cfg.pgvector_url),
        document_source: Some(cfg.document_source.as_str().to_string()),
        sharepoint_site: opt(&cfg.sharepoint_site),
        sharepoint_username: opt(&cfg.sharepoint_username),
        sharepoint_password: opt(&cfg.sharepoint_password),
        embedding_provider: Some(cfg.embedding.provider.clone()),
        embedding_model: Some(cfg.embedding.model.clone()),
        embedding_api_key: opt(&cfg.embedding.api_key),
        reranking_provider: Some(cfg.reranking.provider.clone()),
        reranking_model: Some(cfg.reranking.model.clone()),
        reranking_api_key: opt(&cfg.reranking.api_key),
        llm_provider: Some(cfg.llm.provider.clone()),
        llm_model: Some(cfg.llm.model.clone()),
        llm_api_key: opt(&cfg.llm.api_key),
    }
}

/// Map a fetched wire record to a complete draft.
///
/// This is the whole-record defaulting pass: every core field that is
/// missing, null, or empty falls back to the compiled-in default
/// (selectors that don't parse fall back too), and every optional field
/// lands as a string, empty when absent.
pub fn from_wire(wire: WireConfig) -> Configuration {
    let d = Configuration::default();
    Configuration {
        database: wire
            .database
            .as_deref()
            .and_then(DatabaseBackend::parse)
            .unwrap_or(d.database),
        postgres_url: text(wire.postgres_url),
        vector_store: wire
            .vector_store
            .as_deref()
            .and_then(VectorStore::parse)
            .unwrap_or(d.vector_store),
        pgvector_url: text(wire.pgvector_url),
        document_source: wire
            .document_source
            .as_deref()
            .and_then(DocumentSource::parse)
            .unwrap_or(d.document_source),
        sharepoint_site: text(wire.sharepoint_site),
        sharepoint_username: text(wire.sharepoint_username),
        sharepoint_password: text(wire.sharepoint_password),
        embedding: ProviderSelection {
            provider: pick(wire.embedding_provider, &d.embedding.provider),
            model: pick(wire.embedding_model, &d.embedding.model),
            api_key: text(wire.embedding_api_key),
        },
        reranking: ProviderSelection {
            provider: pick(wire.reranking_provider, &d.reranking.provider),
            model: pick(wire.reranking_model, &d.reranking.model),
            api_key: text(wire.reranking_api_key),
        },
        llm: ProviderSelection {
            provider: pick(wire.llm_provider, &d.llm.provider),
            model: pick(wire.llm_model, &d.llm.model),
            api_key: text(wire.llm_api_key),
        },
    }
}
