use std::sync::Arc;

use ankiminer_anki::{AnkiConnectClient, NoteTemplate};
use ankiminer_config::Config;
use ankiminer_core::{
    EnglishDefinitionLookup, ExampleSentenceLookup, FileStorage, JapaneseDefinitionLookup,
    LookupSession, Storage, WordStore,
};
use ankiminer_lookup::{HttpLookupClient, LookupClient};
use anyhow::Context;

/// Anki client with the note settings it exports with
pub struct AnkiExport {
    pub client: AnkiConnectClient,
    pub template: NoteTemplate,
}

/// Everything the event loop owns
pub struct AppState<S: Storage> {
    pub store: WordStore<S>,
    pub english: LookupSession<EnglishDefinitionLookup>,
    pub japanese: LookupSession<JapaneseDefinitionLookup>,
    pub sentences: LookupSession<ExampleSentenceLookup>,
    pub lookup: Arc<dyn LookupClient>,
    pub anki: Option<AnkiExport>,
}

impl<S: Storage> AppState<S> {
    pub fn new(store: WordStore<S>, lookup: Arc<dyn LookupClient>, anki: Option<AnkiExport>) -> Self {
        Self {
            store,
            english: LookupSession::new(EnglishDefinitionLookup),
            japanese: LookupSession::new(JapaneseDefinitionLookup),
            sentences: LookupSession::new(ExampleSentenceLookup),
            lookup,
            anki,
        }
    }
}

impl AppState<FileStorage> {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage = FileStorage::new(config.storage.data_path());
        tracing::info!("Using data directory {}", storage.dir().display());

        let store = WordStore::load(storage).context("Failed to load word collection")?;

        let lookup = Arc::new(HttpLookupClient::new(config.lookup.base_url.clone()));

        let anki = if config.anki.enabled {
            Some(AnkiExport {
                client: AnkiConnectClient::new(config.anki.url.clone()),
                template: NoteTemplate::new(
                    config.anki.deck.clone(),
                    config.anki.model.clone(),
                    config.anki.tags.clone(),
                ),
            })
        } else {
            tracing::warn!("Anki integration disabled");
            None
        };

        Ok(Self::new(store, lookup, anki))
    }
}
