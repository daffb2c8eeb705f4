//! Parse tree of a genre expression

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::domain::symbol::Relation;

/// Output of the parser.
///
/// `Sequence` is the loose shape produced at divider level and after
/// parenthetical splicing: nodes and bare relation symbols side by side,
/// with no grouping implied beyond what the nested nodes carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreNode {
    /// A bare genre name
    Leaf(String),
    /// Exactly two operands joined by one operator
    Pair {
        left: Box<GenreNode>,
        relation: Relation,
        right: Box<GenreNode>,
    },
    /// Two or more operands joined by the same operator; associativity is undefined
    Chain {
        relation: Relation,
        operands: Vec<GenreNode>,
    },
    /// Mixed nodes and symbols at one level
    Sequence(Vec<Element>),
}

/// One position of a [`GenreNode::Sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node(GenreNode),
    Symbol(Relation),
}

/// Distinct names and relation kinds of a tree, both sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unordered {
    pub subgenres: BTreeSet<String>,
    pub operators: BTreeSet<Relation>,
}

impl GenreNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        GenreNode::Leaf(name.into())
    }

    pub fn pair(left: GenreNode, relation: Relation, right: GenreNode) -> Self {
        GenreNode::Pair {
            left: Box::new(left),
            relation,
            right: Box::new(right),
        }
    }

    pub fn chain(relation: Relation, operands: Vec<GenreNode>) -> Self {
        GenreNode::Chain { relation, operands }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, GenreNode::Leaf(_))
    }

    /// Flattened tokens as owned strings.
    pub fn flat(&self) -> Vec<String> {
        crate::domain::flatten(self).map(str::to_string).collect()
    }

    /// Collect the distinct genre names and relation kinds.
    pub fn unordered(&self) -> Unordered {
        let mut unordered = Unordered::default();
        self.collect_unordered(&mut unordered);
        unordered
    }

    fn collect_unordered(&self, acc: &mut Unordered) {
        match self {
            GenreNode::Leaf(name) => {
                acc.subgenres.insert(name.clone());
            }
            GenreNode::Pair {
                left,
                relation,
                right,
            } => {
                left.collect_unordered(acc);
                acc.operators.insert(*relation);
                right.collect_unordered(acc);
            }
            GenreNode::Chain { relation, operands } => {
                if operands.len() > 1 {
                    acc.operators.insert(*relation);
                }
                for operand in operands {
                    operand.collect_unordered(acc);
                }
            }
            GenreNode::Sequence(elements) => {
                for element in elements {
                    match element {
                        Element::Node(node) => node.collect_unordered(acc),
                        Element::Symbol(relation) => {
                            acc.operators.insert(*relation);
                        }
                    }
                }
            }
        }
    }

    /// Number of nesting levels; a leaf is depth 1.
    pub fn depth(&self) -> usize {
        1 + match self {
            GenreNode::Leaf(_) => 0,
            GenreNode::Pair { left, right, .. } => left.depth().max(right.depth()),
            GenreNode::Chain { operands, .. } => {
                operands.iter().map(GenreNode::depth).max().unwrap_or(0)
            }
            GenreNode::Sequence(elements) => elements
                .iter()
                .filter_map(|e| match e {
                    Element::Node(node) => Some(node.depth()),
                    Element::Symbol(_) => None,
                })
                .max()
                .unwrap_or(0),
        }
    }

    /// Render as a nested operand: composites are wrapped in parentheses.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}

impl fmt::Display for GenreNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreNode::Leaf(name) => f.write_str(name),
            GenreNode::Pair {
                left,
                relation,
                right,
            } => {
                left.fmt_operand(f)?;
                write!(f, " {relation} ")?;
                right.fmt_operand(f)
            }
            GenreNode::Chain { relation, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {relation} ")?;
                    }
                    operand.fmt_operand(f)?;
                }
                Ok(())
            }
            GenreNode::Sequence(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match element {
                        Element::Node(node) => node.fmt_operand(f)?,
                        Element::Symbol(relation) => write!(f, "{relation}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Nested-array form: leaves are strings, everything else is an array.
impl Serialize for GenreNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GenreNode::Leaf(name) => serializer.serialize_str(name),
            GenreNode::Pair {
                left,
                relation,
                right,
            } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(left)?;
                seq.serialize_element(relation)?;
                seq.serialize_element(right)?;
                seq.end()
            }
            GenreNode::Chain { relation, operands } => {
                let len = operands.len() * 2 - usize::from(!operands.is_empty());
                let mut seq = serializer.serialize_seq(Some(len))?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        seq.serialize_element(relation)?;
                    }
                    seq.serialize_element(operand)?;
                }
                seq.end()
            }
            GenreNode::Sequence(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    match element {
                        Element::Node(node) => seq.serialize_element(node)?,
                        Element::Symbol(relation) => seq.serialize_element(relation)?,
                    }
                }
                seq.end()
            }
        }
    }
}
