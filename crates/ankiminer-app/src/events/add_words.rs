use ankiminer_core::Storage;
use kanal::AsyncSender;

use crate::state::AppState;
use crate::ui::{self, UiEvent};

pub async fn handle_add_words<S: Storage>(
    state: &mut AppState<S>,
    words: Vec<String>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    match state.store.add_words(words) {
        Ok(ids) => {
            tracing::info!("Added {} words", ids.len());
            ui::say(app_to_ui_tx, ui::render_list(state.store.collection())).await
        }
        Err(e) => {
            tracing::error!("Failed to add words: {}", e);
            ui::say(app_to_ui_tx, format!("Could not add words: {e}")).await
        }
    }
}
