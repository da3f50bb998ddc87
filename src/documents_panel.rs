//! Documents panel logic and the `docs` CLI commands.
//!
//! Same shape as the configuration panel: an explicit value type
//! ([`DocumentsPanel`]) advanced by a pure reducer. The list is always
//! refetched wholesale — after an upload (regardless of its outcome) and
//! after a successful delete. A failed list fetch or delete leaves the
//! current list untouched, stale until the next refetch; there is no
//! optimistic removal.
//!
//! Status values are owned by the backend. The console maps them to a
//! badge with [`status_badge`] and otherwise never interprets them.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{Configuration, Document, LoadState};
use crate::status::store_labels;

/// A one-line outcome notice shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Everything that can happen to the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentsEvent {
    ListStarted,
    ListLoaded(Vec<Document>),
    /// Leaves the current list untouched.
    ListFailed(String),
    UploadStarted,
    UploadFinished { message: String, num_chunks: i64 },
    UploadFailed(String),
    DeleteSucceeded,
    /// Leaves the current list untouched.
    DeleteFailed(String),
}

/// The documents panel: the last fetched list plus its state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentsPanel {
    pub documents: Vec<Document>,
    pub list: LoadState,
    pub notice: Option<Notice>,
}

impl Default for DocumentsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentsPanel {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            list: LoadState::Idle,
            notice: None,
        }
    }

    /// Advance the panel by one event.
    pub fn apply(&mut self, event: DocumentsEvent) {
        match event {
            DocumentsEvent::ListStarted => self.list = LoadState::Loading,
            DocumentsEvent::ListLoaded(docs) => {
                self.documents = docs;
                self.list = LoadState::Loaded;
            }
            DocumentsEvent::ListFailed(message) => {
                self.list = LoadState::LoadFailed;
                self.notice = Some(Notice::Error(message));
            }
            DocumentsEvent::UploadStarted => {
                self.notice = Some(Notice::Success("Uploading and processing...".to_string()));
            }
            DocumentsEvent::UploadFinished {
                message,
                num_chunks,
            } => {
                self.notice = Some(Notice::Success(format!(
                    "{} ({} chunks)",
                    message, num_chunks
                )));
            }
            DocumentsEvent::UploadFailed(message) => {
                self.notice = Some(Notice::Error(message));
            }
            DocumentsEvent::DeleteSucceeded => {
                self.notice = Some(Notice::Success(
                    "Document deleted successfully.".to_string(),
                ));
            }
            DocumentsEvent::DeleteFailed(message) => {
                self.notice = Some(Notice::Error(message));
            }
        }
    }
}

/// Badge text for a backend status value.
///
/// Unrecognized values render as the processing badge on purpose: a
/// status this console doesn't know yet is presented as still in flight
/// rather than as an error.
pub fn status_badge(status: &str) -> &'static str {
    match status {
        "completed" => "Completed",
        "failed" => "Failed",
        _ => "Processing",
    }
}

/// Render a wire timestamp for the table: RFC 3339 or naive ISO 8601,
/// falling back to the raw string for anything else.
fn format_upload_date(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

fn print_documents(panel: &DocumentsPanel) {
    println!("Indexed documents ({})", panel.documents.len());

    if panel.documents.is_empty() {
        println!("No documents uploaded yet. Upload a PDF to get started!");
        return;
    }

    let name_width = panel
        .documents
        .iter()
        .map(|d| d.filename.len())
        .max()
        .unwrap_or(8)
        .max(8);

    println!(
        "{:<name_width$}  {:<19}  {:>6}  STATUS",
        "FILENAME", "UPLOADED", "CHUNKS"
    );
    for doc in &panel.documents {
        println!(
            "{:<name_width$}  {:<19}  {:>6}  {}",
            doc.filename,
            format_upload_date(&doc.upload_date),
            doc.num_chunks,
            status_badge(&doc.status)
        );
        if let Some(ref message) = doc.error_message {
            println!("{:name_width$}  error: {}", "", message);
        }
    }
}

async fn fetch_list(api: &ApiClient, panel: &mut DocumentsPanel) {
    panel.apply(DocumentsEvent::ListStarted);
    match api.list_documents().await {
        Ok(docs) => panel.apply(DocumentsEvent::ListLoaded(docs)),
        Err(e) => panel.apply(DocumentsEvent::ListFailed(
            e.user_message("Failed to load documents"),
        )),
    }
}

async fn print_store_line(api: &ApiClient) {
    // Display values only; an absent configuration shows the defaults.
    let cfg = match api.get_configuration().await {
        Ok(Some(cfg)) => cfg,
        _ => Configuration::default(),
    };
    let (vector, metadata) = store_labels(&cfg);
    println!("Vector DB: {}   Metadata DB: {}", vector, metadata);
    println!();
}

/// CLI entry point for `ragc docs list`.
pub async fn run_list(config: &Config) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url);
    let mut panel = DocumentsPanel::new();

    print_store_line(&api).await;
    fetch_list(&api, &mut panel).await;

    if panel.list == LoadState::LoadFailed {
        if let Some(Notice::Error(message)) = &panel.notice {
            eprintln!("Error: {}", message);
        }
        std::process::exit(1);
    }

    print_documents(&panel);
    Ok(())
}

/// CLI entry point for `ragc docs upload <file>`.
///
/// The console validates only that the file can be read; content and
/// type are the backend's concern. The list is refetched after the
/// upload whether it succeeded or not.
pub async fn run_upload(config: &Config, path: &Path) -> Result<()> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);
    let Some(filename) = filename else {
        bail!("not a file path: {}", path.display());
    };
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let api = ApiClient::new(&config.api.base_url);
    let mut panel = DocumentsPanel::new();

    panel.apply(DocumentsEvent::UploadStarted);
    println!("Uploading and processing...");

    let outcome = api.upload_document(bytes, &filename).await;
    let failed = outcome.is_err();
    match outcome {
        Ok(resp) => {
            panel.apply(DocumentsEvent::UploadFinished {
                message: resp.message.clone(),
                num_chunks: resp.num_chunks,
            });
            println!("{} ({} chunks)", resp.message, resp.num_chunks);
        }
        Err(e) => {
            let message = e.user_message("Failed to process document");
            panel.apply(DocumentsEvent::UploadFailed(message.clone()));
            eprintln!("Error: {}", message);
        }
    }

    // Refetch regardless of the upload outcome.
    fetch_list(&api, &mut panel).await;
    println!();
    print_documents(&panel);

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// CLI entry point for `ragc docs delete <id>`.
///
/// Deletion needs explicit confirmation: an interactive y/N prompt on a
/// terminal, or `--yes` anywhere else. On failure the list is left as it
/// was — the error is surfaced with the server detail instead.
pub async fn run_delete(config: &Config, id: &str, yes: bool) -> Result<()> {
    if !yes {
        if !atty::is(atty::Stream::Stdin) {
            bail!("refusing to delete without confirmation; pass --yes");
        }
        eprint!("Delete document {}? [y/N] ", id);
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("Failed to read confirmation")?;
        if !matches!(line.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let api = ApiClient::new(&config.api.base_url);
    let mut panel = DocumentsPanel::new();

    match api.delete_document(id).await {
        Ok(()) => {
            panel.apply(DocumentsEvent::DeleteSucceeded);
            println!("Document deleted successfully.");
        }
        Err(e) => {
            let message = e.user_message("Failed to delete document");
            panel.apply(DocumentsEvent::DeleteFailed(message.clone()));
            eprintln!("Error: failed to delete document: {}", message);
            std::process::exit(1);
        }
    }

    fetch_list(&api, &mut panel).await;
    println!();
    print_documents(&panel);
    Ok(())
}
