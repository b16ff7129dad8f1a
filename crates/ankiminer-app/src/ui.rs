use std::fmt::Write as _;

use ankiminer_core::{
    EnglishDefinitionLookup, ExampleSentenceLookup, JapaneseDefinitionLookup, LookupKind,
    LookupSession, SessionState, Storage,
};
use ankiminer_types::{Collection, Word, WordId};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::AsyncWriteExt;

use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Message(String),
    Close,
}

pub const HELP: &str = "\
add <words>      add words (separated by spaces, ',' or '、')
list             list words
select <n|id>    select a word and look it up
show             show the selected word
delete [n|id]    delete a word (default: the selected one)
sentence <n>     attach the nth example sentence
line <text>      edit the attached sentence
english          use the looked-up English definition
japanese         use the looked-up Japanese definition and reading
reading <text>   set the reading
vocab            toggle vocab-only card
done             toggle done
export           send the selected word to Anki and mark it done
quit             exit";

/// Shortest sentences shown
const SENTENCE_PREVIEW: usize = 5;

pub async fn say(app_to_ui_tx: &AsyncSender<UiEvent>, text: String) -> anyhow::Result<()> {
    app_to_ui_tx.send(UiEvent::Message(text)).await?;
    Ok(())
}

/// Prints messages from the app until it closes
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<UiEvent>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            UiEvent::Message(text) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            UiEvent::Close => break,
        }
    }

    Ok(())
}

fn word_line(position: usize, id: &WordId, word: &Word, selected: bool) -> String {
    format!(
        "{} {:>3}. [{}] {}  ({})",
        if selected { ">" } else { " " },
        position,
        if word.done { "x" } else { " " },
        word.value(),
        id
    )
}

pub fn render_list(collection: &Collection) -> String {
    if collection.words.is_empty() {
        return "No words yet, add some with 'add <words>'".to_string();
    }

    collection
        .words
        .iter()
        .enumerate()
        .map(|(i, (id, word))| {
            word_line(i + 1, id, word, collection.selected_id.as_ref() == Some(id))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field(label: &str, value: Option<&str>) -> String {
    format!("  {label:<10}{}", value.unwrap_or("-"))
}

pub fn render_word(word: &Word) -> String {
    let meta = &word.meta;
    let mut out = format!("{}{}", word.value(), if word.done { "  (done)" } else { "" });

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", field("reading", meta.reading.as_deref()));
    let _ = writeln!(out, "{}", field("english", meta.definition_english.as_deref()));
    let _ = writeln!(out, "{}", field("japanese", meta.definition_japanese.as_deref()));
    let _ = writeln!(out, "{}", field("sentence", meta.sentence.as_ref().map(|s| s.line.as_str())));
    if let Some(series) = meta.sentence.as_ref().and_then(|s| s.series.as_deref()) {
        let _ = writeln!(out, "{}", field("source", Some(series)));
    }
    let _ = write!(out, "{}", field("card", Some(if meta.vocab_card { "vocab" } else { "sentence" })));

    out
}

/// Selected word plus whatever its lookups have found so far
pub fn render_selected<S: Storage>(state: &AppState<S>) -> String {
    let Some((_, word)) = state.store.selected_word() else {
        return "No word selected".to_string();
    };

    [
        render_word(word),
        render_english(&state.english),
        render_japanese(&state.japanese),
        render_sentences(&state.sentences),
    ]
    .join("\n")
}

fn lookup_status<K: LookupKind + Clone>(session: &LookupSession<K>) -> Option<String> {
    match session.state() {
        SessionState::Idle => Some(format!("[{}] -", session.name())),
        SessionState::Pending { word } => Some(format!("[{}] looking up {}...", session.name(), word)),
        SessionState::Settled { .. } => None,
    }
}

pub fn render_english(session: &LookupSession<EnglishDefinitionLookup>) -> String {
    if let Some(status) = lookup_status(session) {
        return status;
    }

    let definition = session.value().and_then(|v| v.definition.as_deref());
    format!("[english] {}", definition.unwrap_or("nothing found"))
}

pub fn render_japanese(
    session: &LookupSession<JapaneseDefinitionLookup>,
) -> String {
    if let Some(status) = lookup_status(session) {
        return status;
    }

    match session.value() {
        Some(value) if value.definition.is_some() || value.reading.is_some() => format!(
            "[japanese] {} {}",
            value.reading.as_deref().unwrap_or("-"),
            value.definition.as_deref().unwrap_or("-")
        ),
        _ => "[japanese] nothing found".to_string(),
    }
}

pub fn render_sentences(session: &LookupSession<ExampleSentenceLookup>) -> String {
    if let Some(status) = lookup_status(session) {
        return status;
    }

    let results = session.value().map(|v| v.results.as_slice()).unwrap_or_default();
    if results.is_empty() {
        return "[sentences] nothing found".to_string();
    }

    let mut out = format!("[sentences] {} found", results.len());
    for (i, sentence) in results.iter().take(SENTENCE_PREVIEW).enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, sentence.line);
        if let Some(series) = &sentence.series {
            let _ = write!(out, "  ({series})");
        }
    }

    out
}
