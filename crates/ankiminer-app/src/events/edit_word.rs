use ankiminer_core::{LookupKind, LookupSession, Storage};
use ankiminer_types::Word;
use kanal::AsyncSender;

use crate::events::WordEdit;
use crate::state::AppState;
use crate::ui::{self, UiEvent};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("No word selected")]
    NoSelection,

    #[error("The {0} lookup has not finished for this word")]
    NotLookedUp(&'static str),

    #[error("The {0} lookup found nothing")]
    NothingFound(&'static str),

    #[error("There is no sentence {0}")]
    NoSuchSentence(usize),

    #[error("The word has no sentence yet")]
    NoSentence,
}

/// Settled result of `session`, only if it belongs to `word`
fn settled_for<'a, K: LookupKind + Clone>(
    session: &'a LookupSession<K>,
    word: &Word,
) -> Result<&'a K::Output, EditError> {
    match session.value() {
        Some(value) if session.word() == Some(word.value()) => Ok(value),
        _ => Err(EditError::NotLookedUp(session.name())),
    }
}

/// Apply `edit` to a copy of the selected word
pub fn apply_edit<S: Storage>(
    state: &AppState<S>,
    word: &mut Word,
    edit: &WordEdit,
) -> Result<(), EditError> {
    match edit {
        WordEdit::Sentence(n) => {
            let sentences = settled_for(&state.sentences, word)?;
            let sentence = n
                .checked_sub(1)
                .and_then(|i| sentences.results.get(i))
                .ok_or(EditError::NoSuchSentence(*n))?;
            word.meta.sentence = Some(sentence.clone());
        }
        WordEdit::Line(line) => {
            let sentence = word.meta.sentence.as_mut().ok_or(EditError::NoSentence)?;
            sentence.line = line.clone();
        }
        WordEdit::English => {
            let english = settled_for(&state.english, word)?;
            let definition = english
                .definition
                .clone()
                .ok_or(EditError::NothingFound(state.english.name()))?;
            word.meta.definition_english = Some(definition);
        }
        WordEdit::Japanese => {
            let japanese = settled_for(&state.japanese, word)?;
            if japanese.definition.is_none() && japanese.reading.is_none() {
                return Err(EditError::NothingFound(state.japanese.name()));
            }
            word.meta.definition_japanese = japanese.definition.clone();
            word.meta.reading = japanese.reading.clone();
        }
        WordEdit::Reading(reading) => word.meta.reading = Some(reading.clone()),
        WordEdit::ToggleVocab => word.meta.vocab_card = !word.meta.vocab_card,
        WordEdit::ToggleDone => word.done = !word.done,
    }

    Ok(())
}

pub async fn handle_word_edit<S: Storage>(
    state: &mut AppState<S>,
    edit: WordEdit,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let edited = match state.store.selected_word() {
        Some((id, word)) => {
            let (id, mut word) = (id.clone(), word.clone());
            apply_edit(state, &mut word, &edit).map(|()| (id, word))
        }
        None => Err(EditError::NoSelection),
    };

    let (id, word) = match edited {
        Ok(edited) => edited,
        Err(e) => return ui::say(app_to_ui_tx, e.to_string()).await,
    };

    match state.store.update_word(word, &id) {
        Ok(true) => ui::say(app_to_ui_tx, ui::render_selected(state)).await,
        Ok(false) => ui::say(app_to_ui_tx, EditError::NoSelection.to_string()).await,
        Err(e) => {
            tracing::error!("Failed to save word {}: {}", id, e);
            ui::say(app_to_ui_tx, format!("Could not save: {e}")).await
        }
    }
}
