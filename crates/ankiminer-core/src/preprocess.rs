use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default JP preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFKC folds half-width kana and full-width latin
        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], "").trim().to_string()
    }

    /// Split user input into raw words, dropping empty pieces
    fn split_words(&self, text: &str) -> Vec<String> {
        text.split(|c: char| c.is_whitespace() || c == ',' || c == '、')
            .map(|piece| self.process(piece))
            .filter(|word| !word.is_empty())
            .collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
