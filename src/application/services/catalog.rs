//! Catalog service
//!
//! Loads track subgenre expressions from a record file and turns each one
//! into the derived fields stored alongside a track.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::CatalogSettings;
use crate::domain::{parse, to_wire, DomainError, GenreNode, ParseError, Relation};
use crate::infrastructure::traits::FileSystem;

/// One subgenre expression read from a record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// 1-based line number in the source file
    pub line: usize,
    /// Genre column, when present
    pub genre: Option<String>,
    pub subgenre: String,
}

impl TrackRecord {
    /// Parse record lines; blank lines and `#` comments are skipped.
    ///
    /// A tab separates an optional leading genre column from the expression.
    pub fn parse_lines(content: &str, path: &Path) -> ApplicationResult<Vec<TrackRecord>> {
        let mut records = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (genre, subgenre) = match raw.split_once('\t') {
                Some((genre, subgenre)) => {
                    let genre = genre.trim();
                    ((!genre.is_empty()).then(|| genre.to_string()), subgenre.trim())
                }
                None => (None, trimmed),
            };

            if subgenre.is_empty() {
                return Err(ApplicationError::InvalidRecord {
                    path: path.to_path_buf(),
                    line,
                    message: "missing subgenre expression".to_string(),
                });
            }

            records.push(TrackRecord {
                line,
                genre,
                subgenre: subgenre.to_string(),
            });
        }
        Ok(records)
    }
}

/// Rewrite the leading subgenre of an expression using the track's genre.
///
/// `?` as the first subgenre becomes `? (<genre>)`; a leading `Trap` is
/// disambiguated between the hip hop and EDM styles. Only the first
/// occurrence is rewritten.
pub fn qualify_subgenre(genre: Option<&str>, subgenre: &str) -> String {
    let genre = match genre {
        Some("Trap") => "Trap (EDM)",
        Some(genre) => genre,
        None => return subgenre.to_string(),
    };

    if subgenre.starts_with('?') {
        if genre == "?" {
            return subgenre.to_string();
        }
        return subgenre.replacen('?', &format!("? ({genre})"), 1);
    }

    if subgenre.starts_with("Trap") && !subgenre.starts_with("Trap (") {
        match genre {
            "Hip Hop" => return subgenre.replacen("Trap", "Trap (Hip Hop)", 1),
            "Trap (EDM)" => return subgenre.replacen("Trap", "Trap (EDM)", 1),
            _ => {}
        }
    }

    subgenre.to_string()
}

/// Derived fields for one successfully parsed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub line: usize,
    pub subgenre: String,
    /// Nested-array JSON of the parsed tree
    pub subgenres_nested: String,
    pub subgenres_flat: Vec<String>,
    pub unordered_subgenres: Vec<String>,
    pub unordered_operators: Vec<Relation>,
}

impl CatalogEntry {
    fn from_node(line: usize, subgenre: String, node: &GenreNode) -> ApplicationResult<Self> {
        let subgenres_nested = to_wire(node).map_err(DomainError::from)?;
        let unordered = node.unordered();
        Ok(Self {
            line,
            subgenre,
            subgenres_nested,
            subgenres_flat: node.flat(),
            unordered_subgenres: unordered.subgenres.into_iter().collect(),
            unordered_operators: unordered.operators.into_iter().collect(),
        })
    }
}

/// A record whose expression was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFailure {
    pub line: usize,
    pub subgenre: String,
    pub error: ParseError,
}

/// Result of cataloging a batch of records, in input order.
#[derive(Debug, Clone, Default)]
pub struct CatalogReport {
    pub entries: Vec<CatalogEntry>,
    pub failures: Vec<CatalogFailure>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Outcome {
    Entry(CatalogEntry),
    Failure(CatalogFailure),
}

/// Service for turning record files into catalog entries.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    settings: CatalogSettings,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: CatalogSettings) -> Self {
        Self { fs, settings }
    }

    /// Read and parse a record file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<TrackRecord>> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read track list", path)?;
        let records = TrackRecord::parse_lines(&content, path)?;
        debug!("load: {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Parse every record, keeping input order.
    ///
    /// With `fail_fast`, everything after the first failing record is dropped.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn catalog(&self, records: &[TrackRecord]) -> ApplicationResult<CatalogReport> {
        let outcomes = records
            .par_iter()
            .map(|record| self.catalog_record(record))
            .collect::<ApplicationResult<Vec<Outcome>>>()?;

        let mut report = CatalogReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Entry(entry) => report.entries.push(entry),
                Outcome::Failure(failure) => {
                    warn!("line {}: {}", failure.line, failure.error);
                    report.failures.push(failure);
                    if self.settings.fail_fast {
                        debug!("catalog: stopping at first failure");
                        break;
                    }
                }
            }
        }
        Ok(report)
    }

    /// Load a record file and catalog it.
    pub fn catalog_file(&self, path: &Path) -> ApplicationResult<CatalogReport> {
        let records = self.load(path)?;
        self.catalog(&records)
    }

    fn catalog_record(&self, record: &TrackRecord) -> ApplicationResult<Outcome> {
        let subgenre = if self.settings.qualify {
            qualify_subgenre(record.genre.as_deref(), &record.subgenre)
        } else {
            record.subgenre.clone()
        };

        match parse(&subgenre) {
            Ok(node) => CatalogEntry::from_node(record.line, subgenre, &node).map(Outcome::Entry),
            Err(error) => Ok(Outcome::Failure(CatalogFailure {
                line: record.line,
                subgenre,
                error,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Trap"), "?", "? (Trap (EDM))")]
    #[case(Some("Hip Hop"), "? > Cloud Rap", "? (Hip Hop) > Cloud Rap")]
    #[case(Some("?"), "?", "?")]
    #[case(Some("Hip Hop"), "Trap | Phonk", "Trap (Hip Hop) | Phonk")]
    #[case(Some("Trap"), "Trap > Hardstyle", "Trap (EDM) > Hardstyle")]
    #[case(Some("Trap (EDM)"), "Trap", "Trap (EDM)")]
    #[case(Some("Hip Hop"), "Trap (EDM) | Drill", "Trap (EDM) | Drill")]
    #[case(Some("House"), "Trap", "Trap")]
    #[case(None, "? > Trap", "? > Trap")]
    fn given_genre_when_qualifying_then_rewrites_first_occurrence(
        #[case] genre: Option<&str>,
        #[case] subgenre: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(qualify_subgenre(genre, subgenre), expected);
    }

    #[test]
    fn given_record_lines_when_parsing_then_skips_comments_and_splits_genre() {
        let content = "# tracks\n\nHip Hop\tTrap | Phonk\nFuture Bass\n";

        let records = TrackRecord::parse_lines(content, Path::new("tracks.tsv")).unwrap();

        assert_eq!(
            records,
            vec![
                TrackRecord {
                    line: 3,
                    genre: Some("Hip Hop".to_string()),
                    subgenre: "Trap | Phonk".to_string(),
                },
                TrackRecord {
                    line: 4,
                    genre: None,
                    subgenre: "Future Bass".to_string(),
                },
            ]
        );
    }

    #[test]
    fn given_genre_without_expression_when_parsing_then_invalid_record() {
        let result = TrackRecord::parse_lines("House\t  \n", Path::new("tracks.tsv"));

        match result {
            Err(ApplicationError::InvalidRecord { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }
}
