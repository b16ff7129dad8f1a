pub mod format;
pub mod word;

pub use format::{format_definitions, sentence_with_focus_word, source_for_sentence};
pub use word::{Collection, Definition, Sentence, SentencesResult, Word, WordCollection, WordId, WordMeta};
