//! Relation symbols: the three operators and their doubled divider forms

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// How two genres relate. The parser never interprets the meaning, only the syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// `|`
    Blend,
    /// `>`
    Derive,
    /// `~`
    Fuse,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Blend, Relation::Derive, Relation::Fuse];

    /// Operator token, e.g. `|`
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Blend => "|",
            Relation::Derive => ">",
            Relation::Fuse => "~",
        }
    }

    /// Divider token, e.g. `||`
    pub fn divider_str(self) -> &'static str {
        match self {
            Relation::Blend => "||",
            Relation::Derive => ">>",
            Relation::Fuse => "~~",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("not a relation operator: {s:?}"))
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A relation token as it appears between genre names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Single character, binds tighter than any divider.
    Operator(Relation),
    /// Doubled character, splits the expression into top-level groups.
    Divider(Relation),
}

impl Symbol {
    /// Recognize a whitespace-delimited word. Only an exact token match counts.
    pub fn from_token(word: &str) -> Option<Self> {
        Relation::ALL.into_iter().find_map(|r| {
            if word == r.as_str() {
                Some(Symbol::Operator(r))
            } else if word == r.divider_str() {
                Some(Symbol::Divider(r))
            } else {
                None
            }
        })
    }

    pub fn relation(self) -> Relation {
        match self {
            Symbol::Operator(r) | Symbol::Divider(r) => r,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Operator(r) => r.as_str(),
            Symbol::Divider(r) => r.divider_str(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_exact_tokens_when_recognizing_then_maps_all_six() {
        assert_eq!(Symbol::from_token("|"), Some(Symbol::Operator(Relation::Blend)));
        assert_eq!(Symbol::from_token(">"), Some(Symbol::Operator(Relation::Derive)));
        assert_eq!(Symbol::from_token("~"), Some(Symbol::Operator(Relation::Fuse)));
        assert_eq!(Symbol::from_token("||"), Some(Symbol::Divider(Relation::Blend)));
        assert_eq!(Symbol::from_token(">>"), Some(Symbol::Divider(Relation::Derive)));
        assert_eq!(Symbol::from_token("~~"), Some(Symbol::Divider(Relation::Fuse)));
    }

    #[test]
    fn given_symbol_like_words_when_recognizing_then_not_a_symbol() {
        for word in ["|||", ">~", "Drum&Bass", "|Trap", "->", ""] {
            assert_eq!(Symbol::from_token(word), None, "{word:?}");
        }
    }

    #[test]
    fn given_relation_when_parsing_str_then_round_trips() {
        for r in Relation::ALL {
            assert_eq!(r.as_str().parse::<Relation>().unwrap(), r);
        }
        assert!("||".parse::<Relation>().is_err());
    }
}
