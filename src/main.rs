//! # RAG Console CLI (`ragc`)
//!
//! The `ragc` binary is the interface to a RAG backend's REST API. It
//! provides commands for inspecting and editing the stored
//! configuration, managing indexed documents, and chatting against
//! indexed content.
//!
//! ## Usage
//!
//! ```bash
//! ragc --config ./config/ragc.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ragc status` | Show the selected vector store and metadata database |
//! | `ragc config show` | Print the stored configuration (defaults when absent) |
//! | `ragc config set k=v ...` | Edit fields and save the whole record back |
//! | `ragc docs list` | List indexed documents with status |
//! | `ragc docs upload <file>` | Upload a PDF for ingestion and indexing |
//! | `ragc docs delete <id>` | Delete a document (asks for confirmation) |
//! | `ragc chat` | Interactive chat loop |
//!
//! ## Examples
//!
//! ```bash
//! # Point the backend at PostgreSQL + pgvector
//! ragc config set database=postgresql postgres_url=postgresql://user:pw@db:5432/rag \
//!     vector_store=pgvector pgvector_url=postgresql://user:pw@db:5432/vectors
//!
//! # Switch the embedding provider (the model resets to the provider default)
//! ragc config set embedding_provider=Cohere embedding_api_key=co-...
//!
//! # Ingest and inspect
//! ragc docs upload ./report.pdf
//! ragc docs list
//!
//! # Chat
//! ragc chat
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rag_console::{chat, config, config_panel, documents_panel, status};

/// RAG Console — configure and drive a RAG backend over its REST API.
///
/// All commands accept a `--config` flag pointing to a TOML settings
/// file. A missing file is fine: the console then talks to a backend at
/// `http://localhost:8000/api/v1`.
#[derive(Parser)]
#[command(
    name = "ragc",
    about = "RAG Console — configure and drive a RAG backend over its REST API",
    version,
    long_about = "RAG Console manages a retrieval-augmented-generation backend through its \
    REST API: choose storage backends (SQLite/PostgreSQL, FAISS/pgvector), pick \
    embedding/reranking/LLM providers and models, upload PDF documents for ingestion, and \
    chat against indexed content."
)]
struct Cli {
    /// Path to console settings (TOML). A missing file uses defaults.
    #[arg(long, global = true, default_value = "./config/ragc.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the selected vector store and metadata database.
    Status,

    /// Inspect or edit the stored configuration record.
    ///
    /// The record is a singleton on the backend: it is loaded wholesale,
    /// edited in memory, and written back wholesale. Concurrent editors
    /// last-write-win.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage indexed documents.
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },

    /// Chat against indexed content.
    ///
    /// Line-oriented loop on stdin. Blank lines are ignored; Ctrl-D
    /// exits. Answers are currently simulated — the backend does not
    /// expose a query endpoint yet.
    Chat,
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the stored configuration, or the compiled defaults when
    /// nothing is stored yet.
    Show,

    /// Apply `key=value` assignments and save the whole record back.
    ///
    /// Keys use the wire names: `database`, `postgres_url`,
    /// `vector_store`, `pgvector_url`, `document_source`,
    /// `sharepoint_site`, `sharepoint_username`, `sharepoint_password`,
    /// and `<slot>_provider` / `<slot>_model` / `<slot>_api_key` for
    /// `embedding`, `reranking`, and `llm`. Setting a provider resets
    /// that slot's model to the provider's first suggested model.
    Set {
        /// Assignments, e.g. `database=postgresql postgres_url=...`.
        #[arg(required = true, value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
}

/// Document subcommands.
#[derive(Subcommand)]
enum DocsAction {
    /// List indexed documents with upload date, chunk count, and status.
    List,

    /// Upload a PDF for ingestion and indexing, then refresh the list.
    Upload {
        /// Path to the PDF file.
        file: PathBuf,
    },

    /// Delete a document and its vectors by id, then refresh the list.
    Delete {
        /// Document id, as shown by the backend.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Parse a `key=value` pair for `config set` assignments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Status => {
            status::run_status(&cfg).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config_panel::run_show(&cfg).await?;
            }
            ConfigAction::Set { fields } => {
                config_panel::run_set(&cfg, &fields).await?;
            }
        },
        Commands::Docs { action } => match action {
            DocsAction::List => {
                documents_panel::run_list(&cfg).await?;
            }
            DocsAction::Upload { file } => {
                documents_panel::run_upload(&cfg, &file).await?;
            }
            DocsAction::Delete { id, yes } => {
                documents_panel::run_delete(&cfg, &id, yes).await?;
            }
        },
        Commands::Chat => {
            chat::run_chat(&cfg).await?;
        }
    }

    Ok(())
}
