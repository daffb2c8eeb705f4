//! Domain layer: the genre expression grammar and its tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every function here is pure and safe to call from many threads at once.

pub mod alternative_names;
pub mod arena;
pub mod error;
pub mod flatten;
pub mod node;
pub mod parser;
pub mod segment;
pub mod symbol;
pub mod tree_display;
pub mod wire;

pub use alternative_names::parse_alternative_names;
pub use error::{AliasError, DomainError, ParseError, WireError};
pub use flatten::{flatten, Flatten};
pub use node::{Element, GenreNode, Unordered};
pub use parser::{parse, ParseResult};
pub use segment::{tokenize, Segment};
pub use symbol::{Relation, Symbol};
pub use tree_display::TreeNodeConvert;
pub use wire::{from_wire, to_wire};
