//! Nested-array wire format shared with the query layer and the ETL pipeline
//!
//! `["Space Bass", "|", ["Drum & Bass", ">", "Brostep"]]`
//!
//! Names and relation symbols are both plain strings here; a string equal to
//! `|`, `>` or `~` is read back as a symbol. A lone top-level genre is a
//! one-element array.

use serde_json::Value;

use crate::domain::error::WireError;
use crate::domain::node::{Element, GenreNode};
use crate::domain::symbol::Relation;

pub type WireResult<T> = Result<T, WireError>;

/// Serialize a tree to its nested-array JSON form.
pub fn to_wire(node: &GenreNode) -> WireResult<String> {
    let text = match node {
        GenreNode::Leaf(name) => serde_json::to_string(&[name])?,
        _ => serde_json::to_string(node)?,
    };
    Ok(text)
}

/// Read a tree back from its nested-array JSON form.
///
/// Arrays whose odd positions all hold the same symbol come back as
/// [`GenreNode::Chain`], other arrays as [`GenreNode::Sequence`].
pub fn from_wire(text: &str) -> WireResult<GenreNode> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => array_to_node(items),
        other => Err(WireError::UnexpectedValue(other.to_string())),
    }
}

fn array_to_node(items: Vec<Value>) -> WireResult<GenreNode> {
    let mut elements = items
        .into_iter()
        .map(value_to_element)
        .collect::<WireResult<Vec<_>>>()?;

    match elements.len() {
        0 => return Err(WireError::EmptyArray),
        1 => {
            return match elements.pop() {
                Some(Element::Node(node)) => Ok(node),
                Some(Element::Symbol(relation)) => {
                    Err(WireError::MisplacedSymbol(relation.to_string()))
                }
                None => Err(WireError::EmptyArray),
            };
        }
        _ => {}
    }

    if let Some(relation) = uniform_relation(&elements) {
        let operands = elements
            .into_iter()
            .filter_map(|e| match e {
                Element::Node(node) => Some(node),
                Element::Symbol(_) => None,
            })
            .collect();
        return Ok(GenreNode::chain(relation, operands));
    }
    Ok(GenreNode::Sequence(elements))
}

fn value_to_element(value: Value) -> WireResult<Element> {
    match value {
        Value::String(s) => Ok(match symbol_of(&s) {
            Some(relation) => Element::Symbol(relation),
            None => Element::Node(GenreNode::Leaf(s)),
        }),
        Value::Array(items) => array_to_node(items).map(Element::Node),
        other => Err(WireError::UnexpectedValue(other.to_string())),
    }
}

fn symbol_of(s: &str) -> Option<Relation> {
    s.parse().ok()
}

/// The relation, if the elements strictly alternate node/symbol with one
/// symbol kind and end on a node.
fn uniform_relation(elements: &[Element]) -> Option<Relation> {
    if elements.len() % 2 == 0 {
        return None;
    }
    let mut relation = None;
    for (i, element) in elements.iter().enumerate() {
        match (i % 2, element) {
            (0, Element::Node(_)) => {}
            (1, Element::Symbol(r)) if relation.is_none() || relation == Some(*r) => {
                relation = Some(*r);
            }
            _ => return None,
        }
    }
    relation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_leaf_when_writing_then_one_element_array() {
        let node = GenreNode::leaf("Space Bass");
        assert_eq!(to_wire(&node).unwrap(), r#"["Space Bass"]"#);
        assert_eq!(from_wire(r#"["Space Bass"]"#).unwrap(), node);
    }

    #[test]
    fn given_arrays_when_reading_then_chain_or_sequence() {
        let node = from_wire(r#"[["Space Bass","|","Post-Synthpop"],">","Electro House"]"#).unwrap();
        match node {
            GenreNode::Chain { relation, operands } => {
                assert_eq!(relation, Relation::Derive);
                assert_eq!(operands.len(), 2);
                assert_eq!(
                    operands[0],
                    GenreNode::chain(
                        Relation::Blend,
                        vec![GenreNode::leaf("Space Bass"), GenreNode::leaf("Post-Synthpop")]
                    )
                );
            }
            other => panic!("expected chain, got {other:?}"),
        }

        let node = from_wire(r#"["A","|","B",">","C"]"#).unwrap();
        assert!(matches!(node, GenreNode::Sequence(ref e) if e.len() == 5));
    }

    #[test]
    fn given_bad_values_when_reading_then_errors() {
        assert!(matches!(from_wire("[]"), Err(WireError::EmptyArray)));
        assert!(matches!(from_wire(r#"["A", 3]"#), Err(WireError::UnexpectedValue(_))));
        assert!(matches!(from_wire(r#""A""#), Err(WireError::UnexpectedValue(_))));
        assert!(matches!(from_wire(r#"["|"]"#), Err(WireError::MisplacedSymbol(_))));
        assert!(matches!(from_wire("[\"A\""), Err(WireError::Json(_))));
    }
}
