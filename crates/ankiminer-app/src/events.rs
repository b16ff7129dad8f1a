use ankiminer_core::{EnglishDefinitionResult, JapaneseDefinitionResult, Settlement, Storage};
use ankiminer_types::SentencesResult;
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::ui::{self, UiEvent};

pub mod add_words;
pub mod command;
pub mod edit_word;
pub mod export_word;
pub mod select_word;

pub use command::{Command, WordEdit};

use add_words::handle_add_words;
use edit_word::handle_word_edit;
use export_word::handle_export;
use select_word::{handle_delete, handle_select, refresh_lookups};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    EnglishSettled(Settlement<EnglishDefinitionResult>),
    JapaneseSettled(Settlement<JapaneseDefinitionResult>),
    SentencesSettled(Settlement<SentencesResult>),
    Quit,
}

/// App's main loop, the only place state is mutated
pub async fn event_loop<S: Storage>(
    mut state: AppState<S>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    refresh_lookups(&mut state, &app_tx);

    ui::say(&app_to_ui_tx, ui::render_list(state.store.collection())).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", std::mem::discriminant(&event));
        if !handle_events(&mut state, &app_tx, &app_to_ui_tx, event).await? {
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Stopping");
    let _ = app_to_ui_tx.send(UiEvent::Close).await;
    Ok(())
}

/// Handle one event. Returns `false` once the app should stop.
pub async fn handle_events<S: Storage>(
    state: &mut AppState<S>,
    app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::Command(command) => {
            return handle_command(state, app_tx, app_to_ui_tx, command).await;
        }
        AppEvent::EnglishSettled(settlement) => {
            if state.english.settle(settlement) {
                ui::say(app_to_ui_tx, ui::render_english(&state.english)).await?;
            }
        }
        AppEvent::JapaneseSettled(settlement) => {
            if state.japanese.settle(settlement) {
                ui::say(app_to_ui_tx, ui::render_japanese(&state.japanese)).await?;
            }
        }
        AppEvent::SentencesSettled(settlement) => {
            if state.sentences.settle(settlement) {
                ui::say(app_to_ui_tx, ui::render_sentences(&state.sentences)).await?;
            }
        }
        AppEvent::Quit => return Ok(false),
    }

    Ok(true)
}

async fn handle_command<S: Storage>(
    state: &mut AppState<S>,
    app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
    command: Command,
) -> anyhow::Result<bool> {
    tracing::debug!("Command: {:?}", command);
    match command {
        Command::Add(words) => handle_add_words(state, words, app_to_ui_tx).await?,
        Command::List => {
            ui::say(app_to_ui_tx, ui::render_list(state.store.collection())).await?;
        }
        Command::Select(target) => handle_select(state, &target, app_tx, app_to_ui_tx).await?,
        Command::Show => {
            ui::say(app_to_ui_tx, ui::render_selected(state)).await?;
        }
        Command::Delete(target) => {
            handle_delete(state, target.as_deref(), app_tx, app_to_ui_tx).await?
        }
        Command::Edit(edit) => handle_word_edit(state, edit, app_to_ui_tx).await?,
        Command::Export => handle_export(state, app_to_ui_tx).await?,
        Command::Help => ui::say(app_to_ui_tx, ui::HELP.to_string()).await?,
        Command::Quit => return Ok(false),
    }

    Ok(true)
}
