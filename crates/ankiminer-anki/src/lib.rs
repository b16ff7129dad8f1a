mod client;
mod note;

pub use client::AnkiConnectClient;
pub use note::{NoteTemplate, build_note, note_tags};

use ankiminer_types::Word;
use anyhow::Result;

/// Export a finished word as a note using the provided client and template
pub async fn add_word(
    client: &AnkiConnectClient,
    template: &NoteTemplate,
    word: &Word,
) -> Result<u64> {
    let note = build_note(template, word);
    tracing::debug!("Adding note for '{}' to deck '{}'", word.value(), template.deck);

    client.add_note(note).await
}
