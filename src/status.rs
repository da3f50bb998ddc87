//! Read-only deployment status display.
//!
//! The sidebar values of the console: which vector store and which
//! metadata database the deployment is configured for. Display only —
//! nothing here mutates anything.

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::Configuration;

/// Uppercased display labels for the selected stores:
/// `(vector store, metadata database)`, e.g. `("FAISS", "SQLITE")`.
pub fn store_labels(cfg: &Configuration) -> (String, String) {
    (
        cfg.vector_store.as_str().to_uppercase(),
        cfg.database.as_str().to_uppercase(),
    )
}

/// CLI entry point for `ragc status`.
pub async fn run_status(config: &Config) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url);

    let (stored, cfg) = match api.get_configuration().await {
        Ok(Some(cfg)) => (true, cfg),
        Ok(None) => (false, Configuration::default()),
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let (vector, metadata) = store_labels(&cfg);
    println!("RAG System");
    println!("  API base URL: {}", api.base_url());
    println!("  Vector DB:    {}", vector);
    println!("  Metadata DB:  {}", metadata);
    if !stored {
        println!("  (no configuration stored; showing defaults)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatabaseBackend, VectorStore};

    #[test]
    fn labels_are_uppercased_selections() {
        let mut cfg = Configuration::default();
        assert_eq!(store_labels(&cfg), ("FAISS".to_string(), "SQLITE".to_string()));

        cfg.vector_store = VectorStore::Pgvector;
        cfg.database = DatabaseBackend::Postgresql;
        assert_eq!(
            store_labels(&cfg),
            ("PGVECTOR".to_string(), "POSTGRESQL".to_string())
        );
    }
}
