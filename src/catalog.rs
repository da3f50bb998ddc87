//! Static provider catalog.
//!
//! Enumerates the embedding, reranking, and LLM providers the console
//! offers, each with its ordered model list and whether it needs an API
//! key. The catalog is compiled in: no mutation, no network.
//!
//! Selecting a provider defaults the slot's model to the provider's first
//! listed model. An unknown provider name is not an error — it simply has
//! no model suggestions and no key requirement.

use std::fmt;

/// The three provider slots of the configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSlot {
    Embedding,
    Reranking,
    Llm,
}

impl ProviderSlot {
    /// All slots, in the order they appear in the configuration form.
    pub const ALL: [ProviderSlot; 3] = [
        ProviderSlot::Embedding,
        ProviderSlot::Reranking,
        ProviderSlot::Llm,
    ];

    /// Wire/key prefix for this slot (`embedding`, `reranking`, `llm`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSlot::Embedding => "embedding",
            ProviderSlot::Reranking => "reranking",
            ProviderSlot::Llm => "llm",
        }
    }

    /// Human-facing section label.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderSlot::Embedding => "Embedding",
            ProviderSlot::Reranking => "Reranking",
            ProviderSlot::Llm => "LLM",
        }
    }
}

impl fmt::Display for ProviderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry: one provider available for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderEntry {
    pub name: &'static str,
    /// Suggested models, in preference order. The first entry is the
    /// default a slot's model resets to when this provider is selected.
    pub models: &'static [&'static str],
    pub requires_api_key: bool,
}

const EMBEDDING_PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        name: "OpenAI",
        models: &[
            "text-embedding-3-small",
            "text-embedding-3-large",
            "text-embedding-ada-002",
        ],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "Cohere",
        models: &["embed-english-v3.0", "embed-multilingual-v3.0"],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "HuggingFace",
        models: &[
            "sentence-transformers/all-MiniLM-L6-v2",
            "BAAI/bge-small-en-v1.5",
        ],
        requires_api_key: false,
    },
    ProviderEntry {
        name: "Voyage AI",
        models: &["voyage-2", "voyage-large-2"],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "DeepInfra",
        models: &[
            "BAAI/bge-base-en-v1.5",
            "sentence-transformers/all-MiniLM-L6-v2",
        ],
        requires_api_key: true,
    },
];

const RERANKING_PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        name: "Cohere",
        models: &["rerank-english-v3.0", "rerank-multilingual-v3.0"],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "Jina AI",
        models: &[
            "jina-reranker-v1-base-en",
            "jina-reranker-v2-base-multilingual",
        ],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "DeepInfra",
        models: &["BAAI/bge-reranker-v2-m3", "mixedbread-ai/mxbai-rerank-large-v1"],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "Local",
        models: &["cross-encoder/ms-marco-MiniLM-L-12-v2"],
        requires_api_key: false,
    },
];

const LLM_PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        name: "OpenAI",
        models: &["gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "Anthropic",
        models: &["claude-3-5-sonnet-20241022", "claude-3-5-haiku-20241022"],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "DeepInfra",
        models: &[
            "meta-llama/Meta-Llama-3.1-70B-Instruct",
            "mistralai/Mixtral-8x7B-Instruct-v0.1",
        ],
        requires_api_key: true,
    },
    ProviderEntry {
        name: "Groq",
        models: &["llama-3.1-70b-versatile", "mixtral-8x7b-32768"],
        requires_api_key: true,
    },
];

/// Providers available for a slot, in declared order.
pub fn providers(slot: ProviderSlot) -> &'static [ProviderEntry] {
    match slot {
        ProviderSlot::Embedding => EMBEDDING_PROVIDERS,
        ProviderSlot::Reranking => RERANKING_PROVIDERS,
        ProviderSlot::Llm => LLM_PROVIDERS,
    }
}

/// Find a provider by exact name within a slot.
pub fn lookup(slot: ProviderSlot, name: &str) -> Option<&'static ProviderEntry> {
    providers(slot).iter().find(|p| p.name == name)
}

/// The model a slot resets to when `name` is selected: the provider's
/// first listed model, or `""` for an unknown provider.
pub fn default_model(slot: ProviderSlot, name: &str) -> &'static str {
    lookup(slot, name)
        .and_then(|p| p.models.first().copied())
        .unwrap_or("")
}

/// Whether the named provider needs an API key. Unknown providers don't.
pub fn requires_api_key(slot: ProviderSlot, name: &str) -> bool {
    lookup(slot, name).map(|p| p.requires_api_key).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_has_providers() {
        for slot in ProviderSlot::ALL {
            assert!(!providers(slot).is_empty());
            for entry in providers(slot) {
                assert!(!entry.models.is_empty(), "{} has no models", entry.name);
            }
        }
    }

    #[test]
    fn declared_order_is_preserved() {
        let names: Vec<&str> = providers(ProviderSlot::Embedding)
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec!["OpenAI", "Cohere", "HuggingFace", "Voyage AI", "DeepInfra"]
        );
    }

    #[test]
    fn lookup_finds_exact_name() {
        let entry = lookup(ProviderSlot::Reranking, "Jina AI").unwrap();
        assert_eq!(entry.models[0], "jina-reranker-v1-base-en");
        assert!(lookup(ProviderSlot::Reranking, "jina ai").is_none());
        assert!(lookup(ProviderSlot::Llm, "NoSuch").is_none());
    }

    #[test]
    fn default_model_is_first_listed() {
        assert_eq!(
            default_model(ProviderSlot::Embedding, "Cohere"),
            "embed-english-v3.0"
        );
        assert_eq!(default_model(ProviderSlot::Llm, "Groq"), "llama-3.1-70b-versatile");
        assert_eq!(default_model(ProviderSlot::Llm, "NoSuch"), "");
    }

    #[test]
    fn api_key_flags() {
        assert!(requires_api_key(ProviderSlot::Embedding, "OpenAI"));
        assert!(!requires_api_key(ProviderSlot::Embedding, "HuggingFace"));
        assert!(!requires_api_key(ProviderSlot::Reranking, "Local"));
        assert!(!requires_api_key(ProviderSlot::Llm, "NoSuch"));
    }
}
