use ankiminer_types::{Collection, Word, WordCollection, WordId};

use crate::error::StoreError;
use crate::storage::Storage;

/// Storage slot holding the serialized collection
pub const COLLECTION_SLOT: &str = "collection";

/// Owner of the word collection
///
/// Every mutation except selection writes the whole collection to storage
/// before the in-memory copy is replaced. A failed write leaves the store
/// untouched.
pub struct WordStore<S: Storage> {
    storage: S,
    collection: Collection,
}

impl<S: Storage> WordStore<S> {
    /// Read the persisted collection, or start empty
    ///
    /// Without a stored selection the first word (by id order) is selected.
    pub fn load(storage: S) -> Result<Self, StoreError> {
        let mut collection = match storage.read(COLLECTION_SLOT)? {
            Some(data) => serde_json::from_str::<Collection>(&data)?,
            None => {
                tracing::info!("No persisted collection, starting empty");
                Collection::default()
            }
        };

        if collection.selected_id.is_none() {
            collection.selected_id = collection.words.keys().next().cloned();
        }

        tracing::info!("Loaded {} words", collection.words.len());
        Ok(Self {
            storage,
            collection,
        })
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn words(&self) -> &WordCollection {
        &self.collection.words
    }

    pub fn word(&self, id: &WordId) -> Option<&Word> {
        self.collection.words.get(id)
    }

    pub fn selected_word_id(&self) -> Option<&WordId> {
        self.collection.selected_id.as_ref()
    }

    /// Selected entry, if the selection points at an existing word
    pub fn selected_word(&self) -> Option<(&WordId, &Word)> {
        self.collection.selected()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a fresh word per raw value, returning the new ids in input order
    pub fn add_words<I, T>(&mut self, raw_values: I) -> Result<Vec<WordId>, StoreError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut words = self.collection.words.clone();
        let mut ids = Vec::new();

        for value in raw_values {
            let id = WordId::generate();
            words.insert(id.clone(), Word::new(value));
            ids.push(id);
        }

        self.persist(Collection {
            words,
            selected_id: self.collection.selected_id.clone(),
        })?;

        tracing::debug!("Added {} words", ids.len());
        Ok(ids)
    }

    /// Replace an existing word in full
    ///
    /// Returns `false` without touching anything when `id` is unknown.
    pub fn update_word(&mut self, word: Word, id: &WordId) -> Result<bool, StoreError> {
        if !self.collection.words.contains_key(id) {
            tracing::debug!("Ignoring update of unknown word {}", id);
            return Ok(false);
        }

        let mut words = self.collection.words.clone();
        words.insert(id.clone(), word);

        self.persist(Collection {
            words,
            selected_id: self.collection.selected_id.clone(),
        })?;

        Ok(true)
    }

    /// Remove a word. Deleting the selected word selects the last remaining one.
    pub fn delete_word(&mut self, id: &WordId) -> Result<(), StoreError> {
        let mut words = self.collection.words.clone();
        words.remove(id);

        let selected_id = if self.collection.selected_id.as_ref() == Some(id) {
            words.keys().next_back().cloned()
        } else {
            self.collection.selected_id.clone()
        };

        self.persist(Collection { words, selected_id })
    }

    /// Change the selection. Not validated and not persisted.
    pub fn set_selected_word_id(&mut self, id: Option<WordId>) {
        self.collection.selected_id = id;
    }

    fn persist(&mut self, collection: Collection) -> Result<(), StoreError> {
        let data = serde_json::to_string(&collection)?;
        self.storage.write(COLLECTION_SLOT, &data)?;
        self.collection = collection;
        Ok(())
    }
}
