//! genreguide: parser and flattener for genre relation expressions
//!
//! Expressions such as `Future Bass || Trap | Dubstep` describe how subgenres
//! relate: `|` blends, `>` derives, `~` fuses. Doubling a symbol (`||`, `>>`,
//! `~~`) divides the expression into groups.
//!
//! ```
//! use genreguide::domain::parse;
//!
//! let node = parse("Drum & Bass > Jungle").unwrap();
//! assert_eq!(node.flat(), vec!["Drum & Bass", ">", "Jungle"]);
//!
//! let grouped = parse("Future Bass || Trap | Dubstep").unwrap();
//! assert_eq!(grouped.to_string(), "Future Bass | (Trap | Dubstep)");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult};
pub use config::Settings;
pub use domain::{flatten, parse, GenreNode, ParseError, Relation};
