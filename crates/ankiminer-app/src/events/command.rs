use std::str::FromStr;

use ankiminer_core::preprocess::{DefaultPreprocessor, Preprocessor};

/// Change to the selected word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordEdit {
    /// Attach the nth (1-based) looked-up sentence
    Sentence(usize),
    /// Edit the attached sentence's line
    Line(String),
    /// Accept the looked-up English definition
    English,
    /// Accept the looked-up Japanese definition and reading
    Japanese,
    Reading(String),
    ToggleVocab,
    ToggleDone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<String>),
    List,
    /// List position (1-based) or word id
    Select(String),
    Show,
    Delete(Option<String>),
    Edit(WordEdit),
    Export,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a sentence number")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let required = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match name {
            "add" | "a" => {
                let words = DefaultPreprocessor.split_words(rest);
                if words.is_empty() {
                    return Err(CommandError::MissingArgument("add"));
                }
                Command::Add(words)
            }
            "list" | "ls" => Command::List,
            "select" | "s" => Command::Select(required("select")?),
            "show" => Command::Show,
            "delete" | "rm" => Command::Delete((!rest.is_empty()).then(|| rest.to_string())),
            "sentence" => {
                let arg = required("sentence")?;
                match arg.parse::<usize>() {
                    Ok(n) if n > 0 => Command::Edit(WordEdit::Sentence(n)),
                    _ => return Err(CommandError::InvalidNumber(arg)),
                }
            }
            "line" => Command::Edit(WordEdit::Line(required("line")?)),
            "english" => Command::Edit(WordEdit::English),
            "japanese" => Command::Edit(WordEdit::Japanese),
            "reading" => Command::Edit(WordEdit::Reading(required("reading")?)),
            "vocab" => Command::Edit(WordEdit::ToggleVocab),
            "done" => Command::Edit(WordEdit::ToggleDone),
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}
