//! Terminal tree view of a parse tree (`genreguide parse --format tree`)
//!
//! Composite nodes are labelled by shape and relation; leaves are the genre
//! names.

use termtree::Tree;

use crate::domain::node::{Element, GenreNode};

/// Render a parse tree for the terminal.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for GenreNode {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            GenreNode::Leaf(name) => Tree::new(name.clone()),
            GenreNode::Pair {
                left,
                relation,
                right,
            } => Tree::new(format!("{relation} pair"))
                .with_leaves([left.to_tree_string(), right.to_tree_string()]),
            GenreNode::Chain { relation, operands } => Tree::new(format!("{relation} chain"))
                .with_leaves(operands.iter().map(|o| o.to_tree_string())),
            GenreNode::Sequence(elements) => {
                Tree::new("sequence".to_string()).with_leaves(elements.iter().map(|e| match e {
                    Element::Node(node) => node.to_tree_string(),
                    Element::Symbol(relation) => Tree::new(relation.to_string()),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse;

    #[test]
    fn given_divider_expression_when_rendering_then_shows_structure() {
        let node = parse("Space Bass || Drum & Bass > Brostep").unwrap();

        let rendered = node.to_tree_string().to_string();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "sequence");
        assert!(lines.iter().any(|l| l.ends_with("Space Bass")));
        assert!(lines.iter().any(|l| l.ends_with("> pair")));
        assert!(lines.iter().any(|l| l.ends_with("Brostep")));
        assert_eq!(lines.len(), 6);
    }
}
