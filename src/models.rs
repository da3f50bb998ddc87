//! Core data types used throughout the console.
//!
//! These types represent the configuration draft being edited, the
//! documents listed from the backend, and the chat messages of the
//! current session.

use serde::{Deserialize, Serialize};

use crate::catalog::ProviderSlot;

/// Metadata database backing the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    Postgresql,
}

impl DatabaseBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackend::Sqlite => "sqlite",
            DatabaseBackend::Postgresql => "postgresql",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sqlite" => Some(DatabaseBackend::Sqlite),
            "postgresql" => Some(DatabaseBackend::Postgresql),
            _ => None,
        }
    }
}

/// Vector index backing the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorStore {
    Faiss,
    Pgvector,
}

impl VectorStore {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorStore::Faiss => "faiss",
            VectorStore::Pgvector => "pgvector",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "faiss" => Some(VectorStore::Faiss),
            "pgvector" => Some(VectorStore::Pgvector),
            _ => None,
        }
    }
}

/// Where documents are ingested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    Local,
    Sharepoint,
}

impl DocumentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSource::Local => "local",
            DocumentSource::Sharepoint => "sharepoint",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "local" => Some(DocumentSource::Local),
            "sharepoint" => Some(DocumentSource::Sharepoint),
            _ => None,
        }
    }
}

/// One provider slot of the draft: provider name, model, and API key.
///
/// The model is free text (the catalog only suggests values) and the key
/// is relevant only when the catalog entry for the provider requires one.
/// All three are plain strings; "not set" is the empty string, never an
/// absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: String,
    pub model: String,
    pub api_key: String,
}

impl ProviderSelection {
    pub fn new(provider: &str, model: &str) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            api_key: String::new(),
        }
    }
}

/// The configuration record: one logical singleton per deployment.
///
/// Held in memory as a mutable draft, loaded wholesale from the backend
/// and written back wholesale on save. Conditional fields (URLs,
/// SharePoint credentials, API keys) default to empty strings when not
/// applicable; the draft never distinguishes "empty" from "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub database: DatabaseBackend,
    pub postgres_url: String,
    pub vector_store: VectorStore,
    pub pgvector_url: String,
    pub document_source: DocumentSource,
    pub sharepoint_site: String,
    pub sharepoint_username: String,
    pub sharepoint_password: String,
    pub embedding: ProviderSelection,
    pub reranking: ProviderSelection,
    pub llm: ProviderSelection,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            database: DatabaseBackend::Sqlite,
            postgres_url: String::new(),
            vector_store: VectorStore::Faiss,
            pgvector_url: String::new(),
            document_source: DocumentSource::Local,
            sharepoint_site: String::new(),
            sharepoint_username: String::new(),
            sharepoint_password: String::new(),
            embedding: ProviderSelection::new("OpenAI", "text-embedding-3-small"),
            reranking: ProviderSelection::new("Cohere", "rerank-english-v3.0"),
            llm: ProviderSelection::new("OpenAI", "gpt-4o-mini"),
        }
    }
}

impl Configuration {
    pub fn slot(&self, slot: ProviderSlot) -> &ProviderSelection {
        match slot {
            ProviderSlot::Embedding => &self.embedding,
            ProviderSlot::Reranking => &self.reranking,
            ProviderSlot::Llm => &self.llm,
        }
    }

    pub fn slot_mut(&mut self, slot: ProviderSlot) -> &mut ProviderSelection {
        match slot {
            ProviderSlot::Embedding => &mut self.embedding,
            ProviderSlot::Reranking => &mut self.reranking,
            ProviderSlot::Llm => &mut self.llm,
        }
    }
}

/// A document row as reported by the backend.
///
/// `status` and `num_chunks` are owned entirely by the backend; the
/// console displays them and never interprets `status` beyond the badge
/// mapping. `upload_date` is kept as the raw wire string and parsed
/// best-effort at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub upload_date: String,
    pub num_chunks: i64,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Loading state shared by the panel state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// Who said a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A retrieval citation attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub name: String,
    pub chunk: i64,
}

/// One entry of the append-only chat log. User messages carry no sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sources: Vec<SourceRef>,
}

/// What a query engine returns for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: String,
    pub sources: Vec<SourceRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_in_defaults() {
        let cfg = Configuration::default();
        assert_eq!(cfg.database, DatabaseBackend::Sqlite);
        assert_eq!(cfg.vector_store, VectorStore::Faiss);
        assert_eq!(cfg.document_source, DocumentSource::Local);
        assert_eq!(cfg.embedding.provider, "OpenAI");
        assert_eq!(cfg.embedding.model, "text-embedding-3-small");
        assert_eq!(cfg.reranking.provider, "Cohere");
        assert_eq!(cfg.reranking.model, "rerank-english-v3.0");
        assert_eq!(cfg.llm.provider, "OpenAI");
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert!(cfg.postgres_url.is_empty());
        assert!(cfg.embedding.api_key.is_empty());
    }

    #[test]
    fn enum_parse_rejects_unknown() {
        assert_eq!(DatabaseBackend::parse("sqlite"), Some(DatabaseBackend::Sqlite));
        assert_eq!(DatabaseBackend::parse("mysql"), None);
        assert_eq!(VectorStore::parse("pgvector"), Some(VectorStore::Pgvector));
        assert_eq!(VectorStore::parse(""), None);
        assert_eq!(
            DocumentSource::parse("sharepoint"),
            Some(DocumentSource::Sharepoint)
        );
    }

    #[test]
    fn document_deserializes_without_error_message() {
        let doc: Document = serde_json::from_str(
            r#"{"id":"doc-1","filename":"report.pdf","upload_date":"2025-06-01T10:30:00","num_chunks":5,"status":"completed"}"#,
        )
        .unwrap();
        assert_eq!(doc.error_message, None);
        assert_eq!(doc.num_chunks, 5);
    }
}
