use std::collections::BTreeSet;

use ankiminer_types::{Word, sentence_with_focus_word, source_for_sentence};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Deck, note type and tags for exported notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteTemplate {
    pub deck: String,
    pub model: String,
    pub tags: Vec<String>,
}

impl NoteTemplate {
    pub fn new(deck: String, model: String, tags: Vec<String>) -> Self {
        Self { deck, model, tags }
    }
}

/// Fixed tags plus the sentence's series, if any
pub fn note_tags(template: &NoteTemplate, word: &Word) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = template.tags.iter().cloned().collect();

    if let Some(series) = word.meta.sentence.as_ref().and_then(|s| s.series.as_ref()) {
        tags.insert(series.clone());
    }

    tags
}

/// AnkiConnect `note` object for `word`
///
/// Duplicates are rejected within the target deck only.
pub fn build_note(template: &NoteTemplate, word: &Word) -> serde_json::Value {
    let meta = &word.meta;
    let vocab_only = if meta.vocab_card { "1" } else { "" };

    json!({
        "deckName": template.deck,
        "modelName": template.model,
        "fields": {
            "Expression": sentence_with_focus_word(word),
            "Focus": word.value(),
            "Reading": meta.reading.clone().unwrap_or_default(),
            "EnglishDefinition": meta.definition_english.clone().unwrap_or_default(),
            "JapaneseDefinition": meta.definition_japanese.clone().unwrap_or_default(),
            "VocabOnlyCard": vocab_only,
            "Source": source_for_sentence(meta.sentence.as_ref()),
        },
        "options": {
            "allowDuplicate": false,
            "duplicateScope": "deck",
            "duplicateScopeOptions": {
                "deckName": template.deck,
                "checkChildren": false,
                "checkAllModels": false,
            },
        },
        "tags": note_tags(template, word),
    })
}

#[cfg(test)]
mod tests {
    use ankiminer_types::Sentence;

    use super::*;

    fn template() -> NoteTemplate {
        NoteTemplate::new(
            "3. Japanese::3. Vocab".to_string(),
            "ankiminer_jp".to_string(),
            vec!["ankiminer".to_string(), "japanese".to_string()],
        )
    }

    fn mined_word() -> Word {
        let mut word = Word::new("猫");
        word.meta.sentence = Some(Sentence::new("猫が寝ている", Some("Natsume".to_string())));
        word.meta.reading = Some("ねこ".to_string());
        word.meta.definition_english = Some("cat".to_string());
        word.meta.definition_japanese = Some("ネコ科の動物".to_string());
        word
    }

    #[test]
    fn fields_come_from_the_word() {
        let note = build_note(&template(), &mined_word());
        let fields = &note["fields"];

        assert_eq!(fields["Expression"], "<b>猫</b>が寝ている");
        assert_eq!(fields["Focus"], "猫");
        assert_eq!(fields["Reading"], "ねこ");
        assert_eq!(fields["EnglishDefinition"], "cat");
        assert_eq!(fields["JapaneseDefinition"], "ネコ科の動物");
        assert_eq!(fields["VocabOnlyCard"], "");
        assert_eq!(fields["Source"], "Natsume");
    }

    #[test]
    fn duplicates_are_scoped_to_the_deck() {
        let note = build_note(&template(), &mined_word());

        assert_eq!(note["deckName"], "3. Japanese::3. Vocab");
        assert_eq!(note["modelName"], "ankiminer_jp");
        assert_eq!(note["options"]["allowDuplicate"], false);
        assert_eq!(note["options"]["duplicateScope"], "deck");
        assert_eq!(
            note["options"]["duplicateScopeOptions"]["deckName"],
            "3. Japanese::3. Vocab"
        );
    }

    #[test]
    fn series_becomes_a_tag() {
        let tags = note_tags(&template(), &mined_word());

        assert!(tags.contains("Natsume"));
        assert!(tags.contains("ankiminer"));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn vocab_card_without_sentence() {
        let mut word = Word::new("犬");
        word.meta.vocab_card = true;

        let note = build_note(&template(), &word);

        assert_eq!(note["fields"]["VocabOnlyCard"], "1");
        assert_eq!(note["fields"]["Expression"], "犬");
        assert_eq!(note["fields"]["Source"], "");
        assert_eq!(note["fields"]["Reading"], "");
        assert_eq!(note["tags"], json!(["ankiminer", "japanese"]));
    }
}
