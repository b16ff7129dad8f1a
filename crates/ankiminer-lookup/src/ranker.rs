use ankiminer_types::{Sentence, SentencesResult};

/// Trim corpus sentences, record the trimmed text as `original` and order them
/// shortest first.
///
/// Surrounding whitespace and byte order marks are stripped. Length is
/// counted in chars. The sort is stable, so sentences of equal
/// length stay in corpus order.
pub fn rank_sentences(raw: SentencesResult) -> SentencesResult {
    let mut results: Vec<Sentence> = raw
        .results
        .into_iter()
        .map(|mut sentence| {
            let line = sentence
                .line
                .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
                .to_string();
            sentence.original = line.clone();
            sentence.line = line;
            sentence
        })
        .collect();

    results.sort_by_key(|s| s.line.chars().count());

    SentencesResult { results }
}
