//! # RAG Console
//!
//! A command-line console for configuring and driving a
//! retrieval-augmented-generation backend over its REST API.
//!
//! The console renders three surfaces over one HTTP client: the
//! configuration record (storage backends, provider/model selections),
//! the document lifecycle (upload, list, delete), and a chat loop whose
//! answer pipeline is still a simulated stand-in behind a trait seam.
//! All retrieval, embedding, reranking, and generation logic lives in
//! the backend; the console issues requests and displays results.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//! │ catalog      │   │ panels        │   │  ApiClient   │
//! │ providers/   │──▶│ config / docs │──▶│  REST /api/v1│──▶ backend
//! │ models       │   │ / chat state  │   │  (reqwest)   │
//! └──────────────┘   └───────────────┘   └──────────────┘
//! ```
//!
//! Each panel owns an explicit state value type advanced by a pure
//! reducer, so every transition is testable without a terminal or a
//! backend; the `ragc` binary is a thin clap shell over the panels'
//! `run_*` entry points.
//!
//! ## Quick Start
//!
//! ```bash
//! ragc status                                  # show selected stores
//! ragc config show                             # stored configuration
//! ragc config set embedding_provider=Cohere    # edit + save wholesale
//! ragc docs upload report.pdf                  # ingest a PDF
//! ragc docs list
//! ragc chat                                    # interactive loop
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Console settings (TOML) |
//! | [`catalog`] | Static provider catalog |
//! | [`models`] | Core data types |
//! | [`wire`] | Configuration wire mapping |
//! | [`api`] | REST client |
//! | [`config_panel`] | Configuration panel state + `config` commands |
//! | [`documents_panel`] | Documents panel state + `docs` commands |
//! | [`chat`] | Chat log, query-engine seam, `chat` command |
//! | [`status`] | Deployment status display |

pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod config_panel;
pub mod documents_panel;
pub mod models;
pub mod status;
pub mod wire;
