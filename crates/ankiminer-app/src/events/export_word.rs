use ankiminer_core::Storage;
use kanal::AsyncSender;

use crate::state::AppState;
use crate::ui::{self, UiEvent};

/// Send the selected word to Anki in the background and mark it done
pub async fn handle_export<S: Storage>(
    state: &mut AppState<S>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let Some((id, word)) = state.store.selected_word() else {
        return ui::say(app_to_ui_tx, "No word selected".to_string()).await;
    };
    let (id, mut word) = (id.clone(), word.clone());

    let Some(anki) = &state.anki else {
        tracing::warn!("Anki integration disabled");
        return ui::say(app_to_ui_tx, "Anki integration is disabled".to_string()).await;
    };

    let client = anki.client.clone();
    let template = anki.template.clone();
    let note_word = word.clone();
    tokio::spawn(async move {
        match ankiminer_anki::add_word(&client, &template, &note_word).await {
            Ok(note_id) => {
                tracing::info!("Added card to Anki: note_id={}", note_id);
            }
            Err(e) => {
                tracing::error!("Failed to add '{}' to Anki: {:#}", note_word.value(), e);
            }
        }
    });

    word.done = true;
    if let Err(e) = state.store.update_word(word, &id) {
        tracing::error!("Failed to mark word {} done: {}", id, e);
    }

    ui::say(app_to_ui_tx, ui::render_selected(state)).await
}
