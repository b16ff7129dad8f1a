use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ankiminer_core::{MemoryStorage, WordStore};
use ankiminer_lookup::{EnglishDefinitions, JapaneseDefinition, LookupClient, LookupError};
use ankiminer_types::{Definition, Sentence, SentencesResult, WordId};
use async_trait::async_trait;
use kanal::AsyncReceiver;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::events::AppEvent;
use crate::state::AppState;
use crate::ui::UiEvent;

/// Lookup double answering every kind for a word once its gate is open
#[derive(Default)]
pub struct FakeLookup {
    gates: Mutex<HashMap<String, watch::Sender<bool>>>,
}

impl FakeLookup {
    /// Hold back answers for `word` until [`FakeLookup::open`]
    pub fn close(&self, word: &str) {
        let (tx, _) = watch::channel(false);
        self.gates.lock().unwrap().insert(word.to_string(), tx);
    }

    pub fn open(&self, word: &str) {
        if let Some(tx) = self.gates.lock().unwrap().get(word) {
            tx.send_replace(true);
        }
    }

    async fn wait(&self, word: &str) {
        let gate = self.gates.lock().unwrap().get(word).map(|tx| tx.subscribe());
        if let Some(mut gate) = gate {
            let _ = gate.wait_for(|open| *open).await;
        }
    }
}

#[async_trait]
impl LookupClient for FakeLookup {
    async fn english_definition(&self, word: &str) -> Result<EnglishDefinitions, LookupError> {
        self.wait(word).await;
        Ok(EnglishDefinitions {
            word: word.to_string(),
            definitions: vec![Definition {
                meaning: format!("meaning of {word}"),
            }],
        })
    }

    async fn japanese_definition(&self, word: &str) -> Result<JapaneseDefinition, LookupError> {
        self.wait(word).await;
        Ok(JapaneseDefinition {
            word: word.to_string(),
            definition: format!("{word}の意味"),
            reading: format!("{word}のよみ"),
        })
    }

    async fn example_sentences(&self, word: &str) -> Result<SentencesResult, LookupError> {
        self.wait(word).await;
        Ok(SentencesResult {
            results: vec![
                Sentence::new(format!("  {word}はとても可愛いですね "), Some("Long".to_string())),
                Sentence::new(format!("{word}だ"), Some("Short".to_string())),
            ],
        })
    }
}

pub fn test_state(lookup: Arc<FakeLookup>) -> AppState<MemoryStorage> {
    let store = WordStore::load(MemoryStorage::new()).unwrap();
    AppState::new(store, lookup, None)
}

pub fn id_of(state: &AppState<MemoryStorage>, value: &str) -> WordId {
    state
        .store
        .words()
        .iter()
        .find(|(_, word)| word.value() == value)
        .map(|(id, _)| id.clone())
        .expect("word not in store")
}

pub async fn next_app_event(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("Timeout waiting for app event")
        .expect("Channel closed")
}

/// Everything the ui received so far
pub fn drain_messages(rx: &AsyncReceiver<UiEvent>) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        if let UiEvent::Message(text) = event {
            messages.push(text);
        }
    }
    messages
}
