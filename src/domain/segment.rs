//! Tokenizer / grouper: whitespace-delimited words into name and symbol runs

use itertools::Itertools;
use tracing::trace;

use crate::domain::symbol::Symbol;

/// A genre name (space-joined words) or one relation/divider token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    Symbol(Symbol),
}

impl Segment {
    /// Source text of the segment, names with single spaces.
    pub fn text(&self) -> &str {
        match self {
            Segment::Name(name) => name,
            Segment::Symbol(symbol) => symbol.as_str(),
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Segment::Symbol(symbol) => Some(*symbol),
            Segment::Name(_) => None,
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Segment::Name(_))
    }
}

/// Split `text` into alternating runs of names and symbols.
///
/// Empty name runs (two symbols in a row, or a leading symbol) produce no
/// segment, so positional validation sees the symbols side by side.
pub fn tokenize(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut words: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        match Symbol::from_token(word) {
            Some(symbol) => {
                if !words.is_empty() {
                    segments.push(Segment::Name(words.join(" ")));
                    words.clear();
                }
                segments.push(Segment::Symbol(symbol));
            }
            None => words.push(word),
        }
    }
    if !words.is_empty() {
        segments.push(Segment::Name(words.join(" ")));
    }

    trace!(count = segments.len(), "tokenized {:?}", text);
    segments
}

/// Join segments back into text, one space between them.
pub fn join(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::symbol::Relation;

    #[test]
    fn given_multi_word_names_when_tokenizing_then_joins_runs() {
        let segments = tokenize("Space  Bass ||\tDrum & Bass > Brostep");
        assert_eq!(
            segments,
            vec![
                Segment::Name("Space Bass".into()),
                Segment::Symbol(Symbol::Divider(Relation::Blend)),
                Segment::Name("Drum & Bass".into()),
                Segment::Symbol(Symbol::Operator(Relation::Derive)),
                Segment::Name("Brostep".into()),
            ]
        );
    }

    #[test]
    fn given_only_symbols_when_tokenizing_then_no_empty_names() {
        let segments = tokenize("| | |");
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_name()));
    }

    #[test]
    fn given_segments_when_joining_then_single_spaced() {
        assert_eq!(join(&tokenize("  (A   |  B)  >  C ")), "(A | B) > C");
    }
}
