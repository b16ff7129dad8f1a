use std::fmt;
use std::future::Future;
use std::sync::Arc;

use ankiminer_lookup::{LookupClient, LookupError, rank_sentences};
use ankiminer_types::{SentencesResult, format_definitions};
use async_trait::async_trait;

/// One kind of lookup a session can track
#[async_trait]
pub trait LookupKind: Send + Sync + 'static {
    /// Result shape. `Default` is what a failed lookup settles with.
    type Output: Clone + Default + fmt::Debug + Send + 'static;

    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        client: &dyn LookupClient,
        word: &str,
    ) -> Result<Self::Output, LookupError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnglishDefinitionResult {
    pub definition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JapaneseDefinitionResult {
    pub definition: Option<String>,
    pub reading: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDefinitionLookup;

#[async_trait]
impl LookupKind for EnglishDefinitionLookup {
    type Output = EnglishDefinitionResult;

    fn name(&self) -> &'static str {
        "english"
    }

    async fn fetch(
        &self,
        client: &dyn LookupClient,
        word: &str,
    ) -> Result<Self::Output, LookupError> {
        let result = client.english_definition(word).await?;
        Ok(EnglishDefinitionResult {
            definition: format_definitions(&result.definitions),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseDefinitionLookup;

#[async_trait]
impl LookupKind for JapaneseDefinitionLookup {
    type Output = JapaneseDefinitionResult;

    fn name(&self) -> &'static str {
        "japanese"
    }

    async fn fetch(
        &self,
        client: &dyn LookupClient,
        word: &str,
    ) -> Result<Self::Output, LookupError> {
        let result = client.japanese_definition(word).await?;
        Ok(JapaneseDefinitionResult {
            definition: Some(result.definition),
            reading: Some(result.reading),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleSentenceLookup;

#[async_trait]
impl LookupKind for ExampleSentenceLookup {
    type Output = SentencesResult;

    fn name(&self) -> &'static str {
        "sentences"
    }

    async fn fetch(
        &self,
        client: &dyn LookupClient,
        word: &str,
    ) -> Result<Self::Output, LookupError> {
        let raw = client.example_sentences(word).await?;
        Ok(rank_sentences(raw))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<T> {
    /// No word tracked
    Idle,
    /// Request in flight for `word`
    Pending { word: String },
    /// Lookup for `word` finished, `value` is empty if it failed
    Settled { word: String, value: T },
}

/// Identifies one request. Stale once the session tracks another word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    word: String,
    generation: u64,
}

impl Ticket {
    pub fn word(&self) -> &str {
        &self.word
    }
}

/// Finished request waiting to be applied to its session
#[derive(Debug, Clone)]
pub struct Settlement<T> {
    pub ticket: Ticket,
    pub value: T,
}

/// Lifecycle of the lookup for the currently tracked word
///
/// Requests run outside the session; their settlements are applied with
/// [`LookupSession::settle`], which drops any settlement whose ticket is not
/// the latest one.
pub struct LookupSession<K: LookupKind> {
    kind: K,
    generation: u64,
    state: SessionState<K::Output>,
}

impl<K: LookupKind + Clone> LookupSession<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            generation: 0,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState<K::Output> {
        &self.state
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Tracked word, pending or settled
    pub fn word(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Pending { word } | SessionState::Settled { word, .. } => Some(word),
        }
    }

    pub fn finished(&self) -> bool {
        matches!(self.state, SessionState::Settled { .. })
    }

    /// Settled result for the tracked word
    pub fn value(&self) -> Option<&K::Output> {
        match &self.state {
            SessionState::Settled { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Switch to `word`, invalidating any request in flight
    ///
    /// Returns the ticket for the request to issue, or `None` when there is
    /// nothing to look up (no word, or the word is already tracked).
    pub fn track(&mut self, word: Option<&str>) -> Option<Ticket> {
        if self.word() == word {
            return None;
        }

        self.generation += 1;

        match word {
            None => {
                self.state = SessionState::Idle;
                None
            }
            Some(word) => {
                self.state = SessionState::Pending {
                    word: word.to_string(),
                };
                Some(Ticket {
                    word: word.to_string(),
                    generation: self.generation,
                })
            }
        }
    }

    /// Future running the request for `ticket`. Never fails: errors settle
    /// with an empty result.
    pub fn request(
        &self,
        client: Arc<dyn LookupClient>,
        ticket: Ticket,
    ) -> impl Future<Output = Settlement<K::Output>> + Send + use<K> {
        let kind = self.kind.clone();

        async move {
            let value = match kind.fetch(client.as_ref(), &ticket.word).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("{} lookup for '{}' failed: {}", kind.name(), ticket.word, e);
                    K::Output::default()
                }
            };

            Settlement { ticket, value }
        }
    }

    /// Apply a finished request. Returns `false` if it was superseded.
    pub fn settle(&mut self, settlement: Settlement<K::Output>) -> bool {
        if settlement.ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale {} result for '{}'",
                self.kind.name(),
                settlement.ticket.word
            );
            return false;
        }

        self.state = SessionState::Settled {
            word: settlement.ticket.word,
            value: settlement.value,
        };
        true
    }

    /// Track `word` and wait for its result in place
    pub async fn run(&mut self, client: Arc<dyn LookupClient>, word: Option<&str>) -> bool {
        match self.track(word) {
            Some(ticket) => {
                let settlement = self.request(client, ticket).await;
                self.settle(settlement)
            }
            None => false,
        }
    }
}
