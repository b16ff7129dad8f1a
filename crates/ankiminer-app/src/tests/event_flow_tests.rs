use std::sync::Arc;
use std::time::Duration;

use ankiminer_core::SessionState;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::support::{FakeLookup, drain_messages, id_of, next_app_event, test_state};
use crate::events::{AppEvent, Command, WordEdit, event_loop, handle_events};
use crate::ui::UiEvent;

fn add(words: &[&str]) -> AppEvent {
    AppEvent::Command(Command::Add(words.iter().map(|w| w.to_string()).collect()))
}

fn select(id: impl ToString) -> AppEvent {
    AppEvent::Command(Command::Select(id.to_string()))
}

fn edit(edit: WordEdit) -> AppEvent {
    AppEvent::Command(Command::Edit(edit))
}

#[tokio::test]
async fn test_selecting_a_word_looks_it_up() {
    let lookup = Arc::new(FakeLookup::default());
    let mut state = test_state(lookup);
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫"])).await.unwrap();
    let id = id_of(&state, "猫");
    handle_events(&mut state, &app_tx, &ui_tx, select(&id)).await.unwrap();

    assert!(matches!(state.english.state(), SessionState::Pending { word } if word == "猫"));

    for _ in 0..3 {
        let event = next_app_event(&app_rx).await;
        handle_events(&mut state, &app_tx, &ui_tx, event).await.unwrap();
    }

    assert!(state.english.finished());
    assert!(state.japanese.finished());
    assert!(state.sentences.finished());

    let messages = drain_messages(&ui_rx);
    assert!(messages.iter().any(|m| m == "[english] meaning of 猫"));
    assert!(messages.iter().any(|m| m.starts_with("[sentences] 2 found\n  1. 猫だ")));
}

#[tokio::test]
async fn test_stale_lookup_does_not_overwrite_new_selection() {
    let lookup = Arc::new(FakeLookup::default());
    lookup.close("猫");
    let mut state = test_state(lookup.clone());
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, _ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫", "犬"])).await.unwrap();
    let cat = id_of(&state, "猫");
    let dog = id_of(&state, "犬");

    handle_events(&mut state, &app_tx, &ui_tx, select(&cat)).await.unwrap();
    handle_events(&mut state, &app_tx, &ui_tx, select(&dog)).await.unwrap();

    // Dog answers first
    for _ in 0..3 {
        let event = next_app_event(&app_rx).await;
        handle_events(&mut state, &app_tx, &ui_tx, event).await.unwrap();
    }
    assert_eq!(state.english.word(), Some("犬"));

    // Then the cat requests resolve late
    lookup.open("猫");
    for _ in 0..3 {
        let event = next_app_event(&app_rx).await;
        handle_events(&mut state, &app_tx, &ui_tx, event).await.unwrap();
    }

    assert_eq!(state.english.word(), Some("犬"));
    assert_eq!(
        state.english.value().unwrap().definition.as_deref(),
        Some("meaning of 犬")
    );
    assert_eq!(
        state.japanese.value().unwrap().reading.as_deref(),
        Some("犬のよみ")
    );
    assert_eq!(state.sentences.value().unwrap().results[0].line, "犬だ");
}

#[tokio::test]
async fn test_accepting_lookup_results_updates_the_word() {
    let lookup = Arc::new(FakeLookup::default());
    let mut state = test_state(lookup);
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫"])).await.unwrap();
    let id = id_of(&state, "猫");

    // Nothing looked up yet
    handle_events(&mut state, &app_tx, &ui_tx, select(&id)).await.unwrap();
    handle_events(&mut state, &app_tx, &ui_tx, edit(WordEdit::English)).await.unwrap();
    assert!(drain_messages(&ui_rx).iter().any(|m| m.contains("has not finished")));
    assert_eq!(state.store.word(&id).unwrap().meta.definition_english, None);

    for _ in 0..3 {
        let event = next_app_event(&app_rx).await;
        handle_events(&mut state, &app_tx, &ui_tx, event).await.unwrap();
    }

    for change in [
        WordEdit::English,
        WordEdit::Japanese,
        WordEdit::Sentence(2),
        WordEdit::Line("猫はとても可愛い".to_string()),
        WordEdit::ToggleVocab,
    ] {
        handle_events(&mut state, &app_tx, &ui_tx, edit(change)).await.unwrap();
    }

    let word = state.store.word(&id).unwrap();
    assert_eq!(word.meta.definition_english.as_deref(), Some("meaning of 猫"));
    assert_eq!(word.meta.definition_japanese.as_deref(), Some("猫の意味"));
    assert_eq!(word.meta.reading.as_deref(), Some("猫のよみ"));
    assert!(word.meta.vocab_card);

    let sentence = word.meta.sentence.as_ref().unwrap();
    assert_eq!(sentence.line, "猫はとても可愛い");
    assert_eq!(sentence.original, "猫はとても可愛いですね");
    assert_eq!(sentence.series.as_deref(), Some("Long"));
}

#[tokio::test]
async fn test_sentence_out_of_range_is_reported() {
    let lookup = Arc::new(FakeLookup::default());
    let mut state = test_state(lookup);
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫"])).await.unwrap();
    handle_events(&mut state, &app_tx, &ui_tx, select(1)).await.unwrap();
    for _ in 0..3 {
        let event = next_app_event(&app_rx).await;
        handle_events(&mut state, &app_tx, &ui_tx, event).await.unwrap();
    }
    drain_messages(&ui_rx);

    handle_events(&mut state, &app_tx, &ui_tx, edit(WordEdit::Sentence(9))).await.unwrap();

    assert_eq!(drain_messages(&ui_rx), vec!["There is no sentence 9".to_string()]);
}

#[tokio::test]
async fn test_selecting_unknown_word_keeps_selection() {
    let lookup = Arc::new(FakeLookup::default());
    let mut state = test_state(lookup);
    let (app_tx, _app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫"])).await.unwrap();
    handle_events(&mut state, &app_tx, &ui_tx, select("no-such-id")).await.unwrap();

    assert_eq!(state.store.selected_word_id(), None);
    assert!(drain_messages(&ui_rx).contains(&"No word 'no-such-id'".to_string()));
}

#[tokio::test]
async fn test_deleting_selected_word_moves_lookups() {
    let lookup = Arc::new(FakeLookup::default());
    let mut state = test_state(lookup);
    let (app_tx, _app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, _ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫", "犬"])).await.unwrap();
    let cat = id_of(&state, "猫");
    let dog = id_of(&state, "犬");
    handle_events(&mut state, &app_tx, &ui_tx, select(&cat)).await.unwrap();

    handle_events(&mut state, &app_tx, &ui_tx, AppEvent::Command(Command::Delete(None)))
        .await
        .unwrap();

    assert_eq!(state.store.selected_word_id(), Some(&dog));
    assert_eq!(state.english.word(), Some("犬"));

    handle_events(&mut state, &app_tx, &ui_tx, AppEvent::Command(Command::Delete(None)))
        .await
        .unwrap();

    assert!(state.store.words().is_empty());
    assert_eq!(state.english.state(), &SessionState::Idle);
}

#[tokio::test]
async fn test_export_without_anki_leaves_word_open() {
    let lookup = Arc::new(FakeLookup::default());
    let mut state = test_state(lookup);
    let (app_tx, _app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<UiEvent>();

    handle_events(&mut state, &app_tx, &ui_tx, add(&["猫"])).await.unwrap();
    let id = id_of(&state, "猫");
    handle_events(&mut state, &app_tx, &ui_tx, select(&id)).await.unwrap();
    handle_events(&mut state, &app_tx, &ui_tx, AppEvent::Command(Command::Export))
        .await
        .unwrap();

    assert!(!state.store.word(&id).unwrap().done);
    assert!(drain_messages(&ui_rx).contains(&"Anki integration is disabled".to_string()));
}

#[tokio::test]
async fn test_event_loop_stops_on_quit() {
    let lookup = Arc::new(FakeLookup::default());
    let state = test_state(lookup);
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, ui_rx) = kanal::unbounded_async::<UiEvent>();

    let handle = tokio::spawn(event_loop(
        state,
        app_rx,
        app_tx.clone(),
        ui_tx,
        CancellationToken::new(),
    ));

    app_tx.send(add(&["猫"])).await.unwrap();
    app_tx.send(AppEvent::Quit).await.unwrap();

    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "Event loop did not stop");

    let mut closed = false;
    while let Ok(Some(event)) = ui_rx.try_recv() {
        closed = matches!(event, UiEvent::Close);
    }
    assert!(closed, "Ui was not closed");
}

#[tokio::test]
async fn test_event_loop_stops_on_cancel() {
    let lookup = Arc::new(FakeLookup::default());
    let state = test_state(lookup);
    let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
    let (ui_tx, _ui_rx) = kanal::unbounded_async::<UiEvent>();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(event_loop(state, app_rx, app_tx, ui_tx, cancel.clone()));
    cancel.cancel();

    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "Event loop ignored cancellation");
}
