use std::sync::Arc;

use ankiminer_core::{LookupKind, LookupSession, Settlement, Storage, WordStore};
use ankiminer_lookup::LookupClient;
use ankiminer_types::WordId;
use kanal::AsyncSender;

use crate::events::AppEvent;
use crate::state::AppState;
use crate::ui::{self, UiEvent};

/// Word id for a 1-based list position or a literal id, if it exists
pub fn resolve_target<S: Storage>(store: &WordStore<S>, target: &str) -> Option<WordId> {
    if let Ok(position) = target.parse::<usize>() {
        if let Some(id) = position
            .checked_sub(1)
            .and_then(|i| store.words().keys().nth(i))
        {
            return Some(id.clone());
        }
    }

    let id = WordId::from(target);
    store.words().contains_key(&id).then_some(id)
}

pub async fn handle_select<S: Storage>(
    state: &mut AppState<S>,
    target: &str,
    app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    // The store accepts any id, so unknown ones are filtered here
    let Some(id) = resolve_target(&state.store, target) else {
        ui::say(app_to_ui_tx, format!("No word '{target}'")).await?;
        return Ok(());
    };

    state.store.set_selected_word_id(Some(id));
    refresh_lookups(state, app_tx);

    ui::say(app_to_ui_tx, ui::render_selected(state)).await
}

pub async fn handle_delete<S: Storage>(
    state: &mut AppState<S>,
    target: Option<&str>,
    app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let id = match target {
        Some(target) => resolve_target(&state.store, target),
        None => state.store.selected_word_id().cloned(),
    };
    let Some(id) = id else {
        ui::say(app_to_ui_tx, "Nothing to delete".to_string()).await?;
        return Ok(());
    };

    if let Err(e) = state.store.delete_word(&id) {
        tracing::error!("Failed to delete word {}: {}", id, e);
        return ui::say(app_to_ui_tx, format!("Could not delete: {e}")).await;
    }

    refresh_lookups(state, app_tx);
    ui::say(app_to_ui_tx, ui::render_list(state.store.collection())).await
}

/// Point every lookup session at the selected word, firing requests for a new one
pub fn refresh_lookups<S: Storage>(state: &mut AppState<S>, app_tx: &AsyncSender<AppEvent>) {
    let word = state
        .store
        .selected_word()
        .map(|(_, word)| word.value().to_string());
    let word = word.as_deref();

    spawn_lookup(&mut state.english, &state.lookup, word, app_tx, AppEvent::EnglishSettled);
    spawn_lookup(&mut state.japanese, &state.lookup, word, app_tx, AppEvent::JapaneseSettled);
    spawn_lookup(&mut state.sentences, &state.lookup, word, app_tx, AppEvent::SentencesSettled);
}

fn spawn_lookup<K, F>(
    session: &mut LookupSession<K>,
    client: &Arc<dyn LookupClient>,
    word: Option<&str>,
    app_tx: &AsyncSender<AppEvent>,
    into_event: F,
) where
    K: LookupKind + Clone,
    F: FnOnce(Settlement<K::Output>) -> AppEvent + Send + 'static,
{
    let Some(ticket) = session.track(word) else {
        return;
    };

    tracing::debug!("Looking up {} for '{}'", session.name(), ticket.word());
    let request = session.request(client.clone(), ticket);
    let tx = app_tx.clone();

    tokio::spawn(async move {
        let settlement = request.await;
        if let Err(e) = tx.send(into_event(settlement)).await {
            tracing::error!("Failed to send lookup result to app: {}", e);
        }
    });
}
