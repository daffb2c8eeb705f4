//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::symbol::Relation;

/// Classified failures of the genre expression parser.
///
/// All of these are deterministic validation failures on malformed input.
/// Each carries the text that was being parsed when the failure happened
/// (for parenthesized groups that is the inner text).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "more than one kind of divider in {text:?}: {first_divider:?} and {second_divider:?}",
        first_divider = .first.divider_str(),
        second_divider = .second.divider_str()
    )]
    AmbiguousDividers {
        text: String,
        first: Relation,
        second: Relation,
    },

    #[error("misplaced operator at segment {index} in {text:?}")]
    MisplacedOperator { text: String, index: usize },

    #[error("ambiguous grouping of genres in {text:?}")]
    AmbiguousGrouping { text: String },

    #[error("empty or malformed expression {text:?}: {reason}")]
    EmptyOrMalformedInput { text: String, reason: String },
}

impl ParseError {
    /// The expression text the error was raised for.
    pub fn text(&self) -> &str {
        match self {
            ParseError::AmbiguousDividers { text, .. }
            | ParseError::MisplacedOperator { text, .. }
            | ParseError::AmbiguousGrouping { text }
            | ParseError::EmptyOrMalformedInput { text, .. } => text,
        }
    }

    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        ParseError::EmptyOrMalformedInput {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures reading the nested-array wire format.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty array in nested genres")]
    EmptyArray,

    #[error("unexpected value in nested genres: {0}")]
    UnexpectedValue(String),

    #[error("relation symbol {0:?} where a genre was expected")]
    MisplacedSymbol(String),
}

/// Failures reading an alternative-names note.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("the first line of {note:?} is neither \"Alternative names:\" nor \"Short for {{name}}\", so it is improperly formatted")]
    ImproperlyFormatted { note: String },
}

/// Domain errors represent violations of the expression and note grammars.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Alias(#[from] AliasError),
}
