use std::{fmt::Display, io, path::PathBuf};

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: LexErrorKind,
    position: Position,
    lexeme: String,
}

impl Error {
    pub fn new(error_kind: LexErrorKind, position: Position, lexeme: impl Into<String>) -> Self {
        Error {
            internal_error: error_kind,
            position,
            lexeme: lexeme.into(),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> LexErrorKind {
        self.internal_error
    }

    pub fn get_lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn get_error_name(&self) -> &str {
        self.internal_error.name()
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            LexErrorKind::UnterminatedComment => ErrorTip::Suggestion(String::from(
                "block comment is missing its closing `*/`",
            )),
            LexErrorKind::UnterminatedCharLiteral => ErrorTip::Suggestion(String::from(
                "character literal must hold exactly one character followed by `'`",
            )),
            LexErrorKind::EmptyCharLiteral => {
                ErrorTip::Suggestion(String::from("character literal is empty"))
            }
            LexErrorKind::UnterminatedStringLiteral => ErrorTip::Suggestion(String::from(
                "string literal is missing its closing `\"`",
            )),
            LexErrorKind::InvalidEscape => ErrorTip::Suggestion(format!(
                "invalid escape sequence in `{}`",
                self.lexeme
            )),
            LexErrorKind::UnknownCharacter => ErrorTip::None,
            LexErrorKind::MalformedNumericLiteral => ErrorTip::Suggestion(format!(
                "invalid number: `{}`, is it above the numeric limit?",
                self.lexeme
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}: {:?}",
            self.internal_error, self.position.line, self.position.column, self.lexeme
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Lexical error kinds carried by `Invalid` tokens.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unterminated character literal")]
    UnterminatedCharLiteral,
    #[error("empty character literal")]
    EmptyCharLiteral,
    #[error("unterminated string literal")]
    UnterminatedStringLiteral,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("unknown character")]
    UnknownCharacter,
    #[error("malformed numeric literal")]
    MalformedNumericLiteral,
}

impl LexErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            LexErrorKind::UnterminatedComment => "UnterminatedComment",
            LexErrorKind::UnterminatedCharLiteral => "UnterminatedCharLiteral",
            LexErrorKind::EmptyCharLiteral => "EmptyCharLiteral",
            LexErrorKind::UnterminatedStringLiteral => "UnterminatedStringLiteral",
            LexErrorKind::InvalidEscape => "InvalidEscape",
            LexErrorKind::UnknownCharacter => "UnknownCharacter",
            LexErrorKind::MalformedNumericLiteral => "MalformedNumericLiteral",
        }
    }
}

/// Failure to obtain source text. Raised before scanning starts.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} is not valid UTF-8")]
    Encoding { path: PathBuf },
}

/// Reads a source file, mapping failures to [`SourceError`].
pub fn read_source(path: impl Into<PathBuf>) -> Result<String, SourceError> {
    let path = path.into();
    let bytes = std::fs::read(&path).map_err(|source| SourceError::Io {
        path: path.clone(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| SourceError::Encoding { path })
}
