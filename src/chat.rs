//! Chat log and the query-engine seam.
//!
//! [`ChatLog`] is the append-only message list of one console session:
//! never persisted, never reloaded. Submitting a query trims it; a query
//! that is empty after trimming appends nothing. A non-empty query
//! appends the user message immediately — before the engine is even
//! asked — which is the one ordering guarantee the log makes: the user
//! message always precedes its assistant reply.
//!
//! [`QueryEngine`] is the seam to the real pipeline
//! (query → retrieval → generation). The backend does not expose that
//! pipeline yet, so the shipped implementation is
//! [`SimulatedQueryEngine`]: a fixed delay, a canned body, and two fixed
//! example sources. Swapping in a real engine is a one-line change in
//! [`create_engine`].

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::models::{ChatMessage, ChatResponse, Role, SourceRef};

/// Append-only message list for the current session.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a raw input line. Returns the trimmed query to hand to the
    /// engine, after appending the user message — or `None` when the
    /// trimmed input is empty, in which case nothing was appended.
    pub fn submit_query(&mut self, input: &str) -> Option<String> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            content: query.to_string(),
            sources: Vec::new(),
        });
        Some(query.to_string())
    }

    /// Append the assistant reply for the most recent query.
    pub fn push_response(&mut self, response: ChatResponse) {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: response.content,
            sources: response.sources,
        });
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// The external collaborator that answers queries. The real contract:
/// retrieve relevant chunks for the query, generate an answer with the
/// configured LLM, and cite the chunks used.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    async fn submit_query(&self, query: &str) -> Result<ChatResponse>;
}

/// Stand-in engine used until the backend exposes a query endpoint.
///
/// Waits a fixed delay, then answers every query with the same canned
/// body and two example sources.
pub struct SimulatedQueryEngine {
    delay: Duration,
}

const SIMULATED_ANSWER: &str = "This is a simulated response. In production, this would \
retrieve relevant chunks from your documents and generate a response using the configured LLM.";

impl SimulatedQueryEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl QueryEngine for SimulatedQueryEngine {
    async fn submit_query(&self, _query: &str) -> Result<ChatResponse> {
        tokio::time::sleep(self.delay).await;
        Ok(ChatResponse {
            content: SIMULATED_ANSWER.to_string(),
            sources: vec![
                SourceRef {
                    name: "document1.pdf".to_string(),
                    chunk: 3,
                },
                SourceRef {
                    name: "document2.docx".to_string(),
                    chunk: 7,
                },
            ],
        })
    }
}

/// Build the engine for this deployment. Only the simulated engine
/// exists today; a real engine slots in here once the backend grows a
/// query endpoint.
pub fn create_engine(config: &Config) -> Box<dyn QueryEngine> {
    Box::new(SimulatedQueryEngine::new(Duration::from_millis(
        config.chat.simulated_delay_ms,
    )))
}

/// CLI entry point for `ragc chat`: a line-oriented loop on stdin.
pub async fn run_chat(config: &Config) -> Result<()> {
    use std::io::Write;

    let engine = create_engine(config);
    let mut log = ChatLog::new();

    println!("Chat with your indexed documents. Blank lines are ignored; Ctrl-D exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(query) = log.submit_query(&line) else {
            continue;
        };

        let response = engine.submit_query(&query).await?;
        println!();
        println!("{}", response.content);
        if !response.sources.is_empty() {
            println!("Sources:");
            for source in &response.sources {
                println!("  - {} (chunk {})", source.name, source.chunk);
            }
        }
        println!();
        log.push_response(response);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_query_appends_nothing() {
        let mut log = ChatLog::new();
        assert_eq!(log.submit_query("  "), None);
        assert_eq!(log.submit_query(""), None);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn query_is_trimmed_and_appended_first() {
        let mut log = ChatLog::new();
        let query = log.submit_query("  what is chunking?  ").unwrap();
        assert_eq!(query, "what is chunking?");
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].role, Role::User);
        assert_eq!(log.messages()[0].content, "what is chunking?");
        assert!(log.messages()[0].sources.is_empty());

        log.push_response(ChatResponse {
            content: "answer".to_string(),
            sources: vec![SourceRef {
                name: "a.pdf".to_string(),
                chunk: 1,
            }],
        });
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn simulated_engine_answers_with_fixed_sources() {
        let engine = SimulatedQueryEngine::new(Duration::ZERO);
        let response = engine.submit_query("anything").await.unwrap();
        assert!(response.content.contains("simulated response"));
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].name, "document1.pdf");
        assert_eq!(response.sources[0].chunk, 3);
        assert_eq!(response.sources[1].name, "document2.docx");
        assert_eq!(response.sources[1].chunk, 7);
    }
}
