mod client;
pub mod ranker;

pub use client::HttpLookupClient;
pub use ranker::rank_sentences;

use ankiminer_types::{Definition, SentencesResult};
use serde::{Deserialize, Serialize};

/// Remote word lookup services
#[async_trait::async_trait]
pub trait LookupClient: Send + Sync {
    /// English meanings from the jisho service
    async fn english_definition(&self, word: &str) -> Result<EnglishDefinitions, LookupError>;

    /// Japanese definition and reading from the goo service
    async fn japanese_definition(&self, word: &str) -> Result<JapaneseDefinition, LookupError>;

    /// Raw, unranked corpus sentences containing the word
    async fn example_sentences(&self, word: &str) -> Result<SentencesResult, LookupError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishDefinitions {
    pub word: String,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JapaneseDefinition {
    pub word: String,
    pub definition: String,
    pub reading: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
