use crate::word::{Definition, Sentence, Word};

/// Join dictionary meanings into one field value
pub fn format_definitions(definitions: &[Definition]) -> Option<String> {
    match definitions {
        [] => None,
        [single] => Some(single.meaning.clone()),
        many => Some(
            many.iter()
                .enumerate()
                .map(|(i, d)| format!("{}. {}", i + 1, d.meaning))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}

/// Sentence line with the studied word in bold, or the bare word without a sentence
pub fn sentence_with_focus_word(word: &Word) -> String {
    let value = word.value();
    match &word.meta.sentence {
        Some(sentence) if !value.is_empty() => {
            sentence
                .line
                .replacen(value, &format!("<b>{value}</b>"), 1)
        }
        Some(sentence) => sentence.line.clone(),
        None => value.to_string(),
    }
}

pub fn source_for_sentence(sentence: Option<&Sentence>) -> String {
    sentence
        .and_then(|s| s.series.clone())
        .unwrap_or_default()
}
