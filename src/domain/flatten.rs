//! Flattening: the ordered leaf tokens of a parse tree

use crate::domain::node::{Element, GenreNode};

/// Pending work of a [`Flatten`] walk.
#[derive(Debug, Clone)]
enum Pending<'a> {
    Node(&'a GenreNode),
    Token(&'static str),
}

/// Lazy pre-order walk over names and relation symbols.
///
/// Cloning the iterator forks the walk; calling [`flatten`] again restarts it.
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<Pending<'a>>,
}

impl<'a> Flatten<'a> {
    fn new(node: &'a GenreNode) -> Self {
        Self {
            stack: vec![Pending::Node(node)],
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            let node = match pending {
                Pending::Token(token) => return Some(token),
                Pending::Node(node) => node,
            };
            // children are pushed in reverse so the leftmost pops first
            match node {
                GenreNode::Leaf(name) => return Some(name.as_str()),
                GenreNode::Pair {
                    left,
                    relation,
                    right,
                } => {
                    self.stack.push(Pending::Node(right));
                    self.stack.push(Pending::Token(relation.as_str()));
                    self.stack.push(Pending::Node(left));
                }
                GenreNode::Chain { relation, operands } => {
                    for (i, operand) in operands.iter().enumerate().rev() {
                        self.stack.push(Pending::Node(operand));
                        if i > 0 {
                            self.stack.push(Pending::Token(relation.as_str()));
                        }
                    }
                }
                GenreNode::Sequence(elements) => {
                    for element in elements.iter().rev() {
                        self.stack.push(match element {
                            Element::Node(child) => Pending::Node(child),
                            Element::Symbol(relation) => Pending::Token(relation.as_str()),
                        });
                    }
                }
            }
        }
        None
    }
}

/// Flatten a parse tree into its names and single-character symbols, left to right.
///
/// Never fails.
pub fn flatten(node: &GenreNode) -> Flatten<'_> {
    Flatten::new(node)
}
