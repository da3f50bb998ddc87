//! Configuration panel logic and the `config` CLI commands.
//!
//! The panel is an explicit value type ([`ConfigPanel`]) advanced by a
//! pure reducer ([`ConfigPanel::apply`]), so every transition is testable
//! without a backend or a terminal. Two independent state machines live
//! here:
//!
//! - load: `Idle → Loading → {Loaded, LoadFailed}`; an absent stored
//!   configuration is a valid outcome that keeps the compiled defaults.
//! - save: `Idle → Saving → {Saved, SaveFailed}`; the whole draft is
//!   written back in one request. The success notice is transient and
//!   clears after [`SAVE_NOTICE_SECS`]; a failure notice persists until
//!   the next save attempt.
//!
//! Selecting a provider resets that slot's model to the provider's first
//! catalog model in the same transition. That reset is part of the
//! contract, not cosmetics.

use anyhow::{anyhow, bail, Result};

use crate::api::ApiClient;
use crate::catalog::{self, ProviderSlot};
use crate::config::Config;
use crate::models::{
    Configuration, DatabaseBackend, DocumentSource, LoadState, VectorStore,
};

/// Seconds after which a successful-save notice clears.
pub const SAVE_NOTICE_SECS: u64 = 3;

/// Save-side state, independent of the load side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    /// Transient: cleared by [`ConfigEvent::SaveNoticeCleared`].
    Saved,
    /// Persistent until the next save attempt.
    SaveFailed(String),
}

/// An edit to exactly one draft field. No validation happens beyond the
/// field typing itself: contradictory combinations (say, sqlite with a
/// populated postgres URL) are accepted and sent as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Database(DatabaseBackend),
    PostgresUrl(String),
    VectorStore(VectorStore),
    PgvectorUrl(String),
    DocumentSource(DocumentSource),
    SharepointSite(String),
    SharepointUsername(String),
    SharepointPassword(String),
    Model(ProviderSlot, String),
    ApiKey(ProviderSlot, String),
}

/// Everything that can happen to the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEvent {
    LoadStarted,
    /// `None` means the backend has nothing stored; the current draft
    /// (compiled defaults on a fresh panel) is kept.
    LoadFinished(Option<Configuration>),
    LoadFailed,
    FieldEdited(FieldEdit),
    /// Sets the slot's provider and resets its model to the provider's
    /// first catalog model (empty for an unknown provider).
    ProviderSelected {
        slot: ProviderSlot,
        provider: String,
    },
    SaveStarted,
    SaveSucceeded,
    SaveFailed(String),
    /// Fires [`SAVE_NOTICE_SECS`] after a successful save. Clears only
    /// the success notice, never a failure.
    SaveNoticeCleared,
}

/// The configuration panel: the draft being edited plus its two state
/// machines.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPanel {
    pub draft: Configuration,
    pub load: LoadState,
    pub save: SaveState,
}

impl Default for ConfigPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPanel {
    pub fn new() -> Self {
        Self {
            draft: Configuration::default(),
            load: LoadState::Idle,
            save: SaveState::Idle,
        }
    }

    /// Advance the panel by one event.
    pub fn apply(&mut self, event: ConfigEvent) {
        match event {
            ConfigEvent::LoadStarted => self.load = LoadState::Loading,
            ConfigEvent::LoadFinished(Some(cfg)) => {
                self.draft = cfg;
                self.load = LoadState::Loaded;
            }
            ConfigEvent::LoadFinished(None) => self.load = LoadState::Loaded,
            ConfigEvent::LoadFailed => self.load = LoadState::LoadFailed,
            ConfigEvent::FieldEdited(edit) => self.edit(edit),
            ConfigEvent::ProviderSelected { slot, provider } => {
                let model = catalog::default_model(slot, &provider).to_string();
                let selection = self.draft.slot_mut(slot);
                selection.provider = provider;
                selection.model = model;
            }
            ConfigEvent::SaveStarted => self.save = SaveState::Saving,
            ConfigEvent::SaveSucceeded => self.save = SaveState::Saved,
            ConfigEvent::SaveFailed(message) => self.save = SaveState::SaveFailed(message),
            ConfigEvent::SaveNoticeCleared => {
                if self.save == SaveState::Saved {
                    self.save = SaveState::Idle;
                }
            }
        }
    }

    fn edit(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Database(v) => self.draft.database = v,
            FieldEdit::PostgresUrl(v) => self.draft.postgres_url = v,
            FieldEdit::VectorStore(v) => self.draft.vector_store = v,
            FieldEdit::PgvectorUrl(v) => self.draft.pgvector_url = v,
            FieldEdit::DocumentSource(v) => self.draft.document_source = v,
            FieldEdit::SharepointSite(v) => self.draft.sharepoint_site = v,
            FieldEdit::SharepointUsername(v) => self.draft.sharepoint_username = v,
            FieldEdit::SharepointPassword(v) => self.draft.sharepoint_password = v,
            FieldEdit::Model(slot, v) => self.draft.slot_mut(slot).model = v,
            FieldEdit::ApiKey(slot, v) => self.draft.slot_mut(slot).api_key = v,
        }
    }

    /// Whether the slot's current provider needs an API key; drives
    /// whether a key row is shown or asked for at all.
    pub fn api_key_required(&self, slot: ProviderSlot) -> bool {
        catalog::requires_api_key(slot, &self.draft.slot(slot).provider)
    }
}

/// Parse one `key=value` assignment into a panel event.
///
/// Provider keys (`embedding_provider`, ...) route through
/// [`ConfigEvent::ProviderSelected`] so the model reset happens; every
/// other key is a single-field edit.
pub fn parse_assignment(key: &str, value: &str) -> Result<ConfigEvent> {
    let event = match key {
        "database" => ConfigEvent::FieldEdited(FieldEdit::Database(
            DatabaseBackend::parse(value)
                .ok_or_else(|| anyhow!("database must be one of: sqlite, postgresql"))?,
        )),
        "postgres_url" => ConfigEvent::FieldEdited(FieldEdit::PostgresUrl(value.to_string())),
        "vector_store" => ConfigEvent::FieldEdited(FieldEdit::VectorStore(
            VectorStore::parse(value)
                .ok_or_else(|| anyhow!("vector_store must be one of: faiss, pgvector"))?,
        )),
        "pgvector_url" => ConfigEvent::FieldEdited(FieldEdit::PgvectorUrl(value.to_string())),
        "document_source" => ConfigEvent::FieldEdited(FieldEdit::DocumentSource(
            DocumentSource::parse(value)
                .ok_or_else(|| anyhow!("document_source must be one of: local, sharepoint"))?,
        )),
        "sharepoint_site" => {
            ConfigEvent::FieldEdited(FieldEdit::SharepointSite(value.to_string()))
        }
        "sharepoint_username" => {
            ConfigEvent::FieldEdited(FieldEdit::SharepointUsername(value.to_string()))
        }
        "sharepoint_password" => {
            ConfigEvent::FieldEdited(FieldEdit::SharepointPassword(value.to_string()))
        }
        "embedding_provider" => ConfigEvent::ProviderSelected {
            slot: ProviderSlot::Embedding,
            provider: value.to_string(),
        },
        "embedding_model" => {
            ConfigEvent::FieldEdited(FieldEdit::Model(ProviderSlot::Embedding, value.to_string()))
        }
        "embedding_api_key" => {
            ConfigEvent::FieldEdited(FieldEdit::ApiKey(ProviderSlot::Embedding, value.to_string()))
        }
        "reranking_provider" => ConfigEvent::ProviderSelected {
            slot: ProviderSlot::Reranking,
            provider: value.to_string(),
        },
        "reranking_model" => {
            ConfigEvent::FieldEdited(FieldEdit::Model(ProviderSlot::Reranking, value.to_string()))
        }
        "reranking_api_key" => {
            ConfigEvent::FieldEdited(FieldEdit::ApiKey(ProviderSlot::Reranking, value.to_string()))
        }
        "llm_provider" => ConfigEvent::ProviderSelected {
            slot: ProviderSlot::Llm,
            provider: value.to_string(),
        },
        "llm_model" => {
            ConfigEvent::FieldEdited(FieldEdit::Model(ProviderSlot::Llm, value.to_string()))
        }
        "llm_api_key" => {
            ConfigEvent::FieldEdited(FieldEdit::ApiKey(ProviderSlot::Llm, value.to_string()))
        }
        other => bail!(
            "unknown configuration key '{}' (run `ragc config show` to see the field names)",
            other
        ),
    };
    Ok(event)
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "(not set)"
    } else {
        "(set)"
    }
}

fn print_draft(panel: &ConfigPanel) {
    let cfg = &panel.draft;

    println!("Database");
    println!("  database:        {}", cfg.database.as_str());
    if cfg.database == DatabaseBackend::Postgresql {
        println!("  postgres_url:    {}", cfg.postgres_url);
    }

    println!("Vector store");
    println!("  vector_store:    {}", cfg.vector_store.as_str());
    if cfg.vector_store == VectorStore::Pgvector {
        println!("  pgvector_url:    {}", cfg.pgvector_url);
    }

    println!("Document source");
    println!("  document_source: {}", cfg.document_source.as_str());
    if cfg.document_source == DocumentSource::Sharepoint {
        println!("  sharepoint_site:     {}", cfg.sharepoint_site);
        println!("  sharepoint_username: {}", cfg.sharepoint_username);
        println!("  sharepoint_password: {}", mask(&cfg.sharepoint_password));
    }

    for slot in ProviderSlot::ALL {
        let selection = cfg.slot(slot);
        println!("{}", slot.label());
        println!("  provider: {}", selection.provider);
        println!("  model:    {}", selection.model);
        if panel.api_key_required(slot) {
            println!("  api key:  {}", mask(&selection.api_key));
        }
        if let Some(entry) = catalog::lookup(slot, &selection.provider) {
            println!("  suggested models: {}", entry.models.join(", "));
        }
    }
}

/// CLI entry point for `ragc config show`.
pub async fn run_show(config: &Config) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url);
    let mut panel = ConfigPanel::new();

    panel.apply(ConfigEvent::LoadStarted);
    match api.get_configuration().await {
        Ok(fetched) => {
            if fetched.is_none() {
                println!("(no configuration stored; showing defaults)");
            }
            panel.apply(ConfigEvent::LoadFinished(fetched));
        }
        Err(e) => {
            panel.apply(ConfigEvent::LoadFailed);
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    }

    print_draft(&panel);
    Ok(())
}

/// CLI entry point for `ragc config set key=value ...`.
///
/// Load–modify–save on the whole record: the stored configuration (or
/// the compiled defaults when nothing is stored or the load fails) is
/// the base, the assignments are applied in order, and the complete
/// draft is written back. Concurrent editors last-write-win; that is the
/// documented behavior of the record, not a bug here.
pub async fn run_set(config: &Config, assignments: &[(String, String)]) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url);
    let mut panel = ConfigPanel::new();

    panel.apply(ConfigEvent::LoadStarted);
    match api.get_configuration().await {
        Ok(fetched) => panel.apply(ConfigEvent::LoadFinished(fetched)),
        Err(e) => {
            panel.apply(ConfigEvent::LoadFailed);
            eprintln!(
                "Warning: could not load the stored configuration ({}); editing defaults",
                e
            );
        }
    }

    for (key, value) in assignments {
        let event = parse_assignment(key, value)?;
        let provider_change = match &event {
            ConfigEvent::ProviderSelected { slot, .. } => Some(*slot),
            _ => None,
        };
        panel.apply(event);
        if let Some(slot) = provider_change {
            let selection = panel.draft.slot(slot);
            if selection.model.is_empty() {
                println!(
                    "{} provider set to {} (no suggested models)",
                    slot.label(),
                    selection.provider
                );
            } else {
                println!(
                    "{} provider set to {}; model reset to {}",
                    slot.label(),
                    selection.provider,
                    selection.model
                );
            }
        }
    }

    panel.apply(ConfigEvent::SaveStarted);
    match api.save_configuration(&panel.draft).await {
        Ok(()) => {
            panel.apply(ConfigEvent::SaveSucceeded);
            println!("Configuration saved successfully.");
            Ok(())
        }
        Err(e) => {
            let message = e.user_message("Failed to save configuration");
            panel.apply(ConfigEvent::SaveFailed(message.clone()));
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_selection_resets_model_and_nothing_else() {
        for slot in ProviderSlot::ALL {
            for entry in catalog::providers(slot) {
                let mut panel = ConfigPanel::new();
                panel.draft.slot_mut(slot).api_key = "key-123".to_string();
                let mut expected = panel.draft.clone();

                panel.apply(ConfigEvent::ProviderSelected {
                    slot,
                    provider: entry.name.to_string(),
                });

                expected.slot_mut(slot).provider = entry.name.to_string();
                expected.slot_mut(slot).model = entry.models[0].to_string();
                assert_eq!(panel.draft, expected, "{} / {}", slot, entry.name);
            }
        }
    }

    #[test]
    fn unknown_provider_clears_model_suggestion() {
        let mut panel = ConfigPanel::new();
        panel.apply(ConfigEvent::ProviderSelected {
            slot: ProviderSlot::Llm,
            provider: "Mystery".to_string(),
        });
        assert_eq!(panel.draft.llm.provider, "Mystery");
        assert_eq!(panel.draft.llm.model, "");
        assert!(!panel.api_key_required(ProviderSlot::Llm));
    }

    #[test]
    fn absent_configuration_keeps_compiled_defaults() {
        let mut panel = ConfigPanel::new();
        panel.apply(ConfigEvent::LoadStarted);
        assert_eq!(panel.load, LoadState::Loading);
        panel.apply(ConfigEvent::LoadFinished(None));
        assert_eq!(panel.load, LoadState::Loaded);
        assert_eq!(panel.draft, Configuration::default());
    }

    #[test]
    fn fetched_configuration_overwrites_every_field() {
        let mut fetched = Configuration::default();
        fetched.database = DatabaseBackend::Postgresql;
        fetched.postgres_url = "postgresql://rag".to_string();
        fetched.llm.model = "gpt-4o".to_string();

        let mut panel = ConfigPanel::new();
        panel.apply(ConfigEvent::LoadFinished(Some(fetched.clone())));
        assert_eq!(panel.draft, fetched);
    }

    #[test]
    fn field_edit_touches_one_field_only() {
        let mut panel = ConfigPanel::new();
        let mut expected = panel.draft.clone();

        panel.apply(ConfigEvent::FieldEdited(FieldEdit::PostgresUrl(
            "postgresql://elsewhere".to_string(),
        )));
        expected.postgres_url = "postgresql://elsewhere".to_string();
        assert_eq!(panel.draft, expected);

        // The contradictory combination (sqlite + postgres URL) is kept
        // as-is and will be sent verbatim.
        assert_eq!(panel.draft.database, DatabaseBackend::Sqlite);
    }

    #[test]
    fn save_notice_is_transient_only_on_success() {
        let mut panel = ConfigPanel::new();
        panel.apply(ConfigEvent::SaveStarted);
        assert_eq!(panel.save, SaveState::Saving);
        panel.apply(ConfigEvent::SaveSucceeded);
        assert_eq!(panel.save, SaveState::Saved);
        panel.apply(ConfigEvent::SaveNoticeCleared);
        assert_eq!(panel.save, SaveState::Idle);
        assert_eq!(SAVE_NOTICE_SECS, 3);
    }

    #[test]
    fn save_failure_persists_until_next_attempt() {
        let mut panel = ConfigPanel::new();
        panel.apply(ConfigEvent::SaveStarted);
        panel.apply(ConfigEvent::SaveFailed("boom".to_string()));
        panel.apply(ConfigEvent::SaveNoticeCleared);
        assert_eq!(panel.save, SaveState::SaveFailed("boom".to_string()));
        panel.apply(ConfigEvent::SaveStarted);
        assert_eq!(panel.save, SaveState::Saving);
    }

    #[test]
    fn keyless_provider_needs_no_api_key() {
        let mut panel = ConfigPanel::new();
        panel.draft.embedding.api_key = "stale-key".to_string();
        panel.apply(ConfigEvent::ProviderSelected {
            slot: ProviderSlot::Embedding,
            provider: "HuggingFace".to_string(),
        });
        assert!(!panel.api_key_required(ProviderSlot::Embedding));
        // The stale value survives in the draft; it simply isn't shown
        // or required while the provider doesn't use one.
        assert_eq!(panel.draft.embedding.api_key, "stale-key");

        panel.apply(ConfigEvent::ProviderSelected {
            slot: ProviderSlot::Embedding,
            provider: "OpenAI".to_string(),
        });
        assert!(panel.api_key_required(ProviderSlot::Embedding));
    }

    #[test]
    fn assignments_parse_to_events() {
        assert_eq!(
            parse_assignment("embedding_provider", "Cohere").unwrap(),
            ConfigEvent::ProviderSelected {
                slot: ProviderSlot::Embedding,
                provider: "Cohere".to_string(),
            }
        );
        assert_eq!(
            parse_assignment("llm_model", "gpt-4o").unwrap(),
            ConfigEvent::FieldEdited(FieldEdit::Model(ProviderSlot::Llm, "gpt-4o".to_string()))
        );
        assert!(parse_assignment("database", "mysql").is_err());
        assert!(parse_assignment("frobnicate", "x").is_err());
    }
}
