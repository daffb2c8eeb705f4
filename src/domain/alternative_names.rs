//! Alternative names of a subgenre, as written in a spreadsheet cell note
//!
//! ```text
//! Alternative names:
//! Brostep
//! Filthstep (retronym)
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::domain::error::AliasError;

/// Markers after which a line stops being part of the name.
static INDICATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i) \((shortened|retronym|plural)").expect("indicator pattern is valid")
});

/// First lines accepted in place of the "Alternative names:" header.
const FIRST_LINE_EXCEPTIONS: [&str; 2] = ["umbrella term", "variations:"];

/// Collect every name mentioned in a note.
pub fn parse_alternative_names(note: &str) -> Result<BTreeSet<String>, AliasError> {
    let mut names = BTreeSet::new();

    let lines = note.lines().map(str::trim).filter(|l| !l.is_empty());
    for (index, line) in lines.enumerate() {
        let lower = line.to_lowercase();

        if lower == "alternative names:" {
            continue;
        }

        if lower.starts_with("short for") {
            let name = line.split_whitespace().skip(2).join(" ");
            names.insert(name);
            continue;
        }

        if index == 0 {
            if FIRST_LINE_EXCEPTIONS.contains(&lower.as_str()) {
                continue;
            }
            return Err(AliasError::ImproperlyFormatted {
                note: note.to_string(),
            });
        }

        match INDICATOR.find(line) {
            Some(found) => names.insert(line[..found.start()].to_string()),
            None => names.insert(line.to_string()),
        };
    }

    debug!(count = names.len(), "parsed alternative names");
    Ok(names)
}
