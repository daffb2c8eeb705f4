//! Genre relation expression parser
//!
//! Grammar, loosest binding first:
//! - dividers (`||`, `>>`, `~~`) split the expression into groups; only one
//!   divider kind may appear;
//! - operators (`|`, `>`, `~`) join names inside a group; mixing operator
//!   kinds at one level needs parentheses to say how they group;
//! - a name is any run of words that are not exactly a symbol token.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::{debug, instrument, trace};

use crate::domain::arena::{LevelArena, Slot};
use crate::domain::error::ParseError;
use crate::domain::node::{Element, GenreNode};
use crate::domain::segment::{self, Segment};
use crate::domain::symbol::{Relation, Symbol};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a genre relation expression into a tree.
///
/// Text without any relation or divider token is returned unchanged as a
/// single leaf.
#[instrument(level = "debug")]
pub fn parse(text: &str) -> ParseResult<GenreNode> {
    let segments = segment::tokenize(text);

    if segments.iter().all(Segment::is_name) {
        if segments.is_empty() {
            return Err(ParseError::malformed(text, "no genre given"));
        }
        debug!("no relation symbols, single leaf");
        return Ok(GenreNode::Leaf(text.to_string()));
    }

    let divider = check_dividers(text, &segments)?;
    check_positions(text, &segments)?;

    match divider {
        None => build_level(text, segments),
        Some(divider) => group_by_divider(text, segments, divider),
    }
}

/// Fail when more than one distinct divider kind appears; return the kind in use.
fn check_dividers(text: &str, segments: &[Segment]) -> ParseResult<Option<Relation>> {
    let mut kind: Option<Relation> = None;
    for symbol in segments.iter().filter_map(Segment::symbol) {
        let Symbol::Divider(relation) = symbol else {
            continue;
        };
        match kind {
            None => kind = Some(relation),
            Some(first) if first != relation => {
                return Err(ParseError::AmbiguousDividers {
                    text: text.to_string(),
                    first,
                    second: relation,
                });
            }
            Some(_) => {}
        }
    }
    Ok(kind)
}

/// Names at even positions, symbols at odd positions, a name at the end.
fn check_positions(text: &str, segments: &[Segment]) -> ParseResult<()> {
    let misplaced = |index| ParseError::MisplacedOperator {
        text: text.to_string(),
        index,
    };
    if let Some(index) = segments
        .iter()
        .enumerate()
        .position(|(i, s)| s.is_name() != (i % 2 == 0))
    {
        return Err(misplaced(index));
    }
    match segments.last() {
        Some(Segment::Name(_)) => Ok(()),
        _ => Err(misplaced(segments.len().saturating_sub(1))),
    }
}

/// Divider level: each divider-separated group is its own level, joined by
/// the divider's single relation symbol.
#[instrument(level = "debug", skip(segments))]
fn group_by_divider(
    text: &str,
    segments: Vec<Segment>,
    divider: Relation,
) -> ParseResult<GenreNode> {
    let mut elements = Vec::new();
    for group in segments.split(|s| matches!(s.symbol(), Some(Symbol::Divider(_)))) {
        if !elements.is_empty() {
            elements.push(Element::Symbol(divider));
        }
        let node = match build_level(text, group.to_vec())? {
            GenreNode::Chain {
                relation,
                mut operands,
            } if operands.len() == 2 => {
                let right = operands.pop();
                let left = operands.pop();
                match (left, right) {
                    (Some(left), Some(right)) => GenreNode::pair(left, relation, right),
                    _ => GenreNode::chain(relation, operands),
                }
            }
            other => other,
        };
        trace!(group = %node, "divider group");
        elements.push(Element::Node(node));
    }
    debug!(groups = (elements.len() + 1) / 2, "grouped by divider {}", divider.divider_str());
    Ok(GenreNode::Sequence(elements))
}

/// One nesting level without dividers.
///
/// A level with a single operator kind is a chain of its raw names, so any
/// parentheses stay inside the names. Only mixed levels look for groups.
fn build_level(text: &str, segments: Vec<Segment>) -> ParseResult<GenreNode> {
    let relations: BTreeSet<Relation> = segments
        .iter()
        .filter_map(Segment::symbol)
        .map(Symbol::relation)
        .collect();
    if relations.len() > 1 {
        return build_mixed_level(text, segments);
    }

    let mut names: Vec<GenreNode> = segments
        .into_iter()
        .filter_map(|s| match s {
            Segment::Name(name) => Some(GenreNode::Leaf(name)),
            Segment::Symbol(_) => None,
        })
        .collect();
    match relations.into_iter().next() {
        Some(relation) => {
            trace!(operands = names.len(), "uniform level");
            Ok(GenreNode::chain(relation, names))
        }
        None if names.len() == 1 => names
            .pop()
            .ok_or_else(|| ParseError::malformed(text, "no genre given")),
        None => Err(ParseError::malformed(text, "no relation between genres")),
    }
}

/// A level mixing operator kinds: parenthesized groups decide the grouping.
fn build_mixed_level(text: &str, segments: Vec<Segment>) -> ParseResult<GenreNode> {
    let spans = find_group_spans(text, &segments)?;

    // parse every group before touching the level
    let mut groups = Vec::with_capacity(spans.len());
    for span in &spans {
        let inner = inner_text(&segments[span.clone()]);
        trace!(?span, inner = %inner, "parenthesized group");
        groups.push(parse(&inner)?);
    }

    let mut level = LevelArena::from_segments(segments);
    for (span, group) in spans.into_iter().zip(groups).rev() {
        level.splice(span, group);
    }

    let mut elements = level
        .into_slots()
        .into_iter()
        .map(|slot| match slot {
            Slot::Group(node) => Ok(Element::Node(node)),
            Slot::Segment(Segment::Symbol(symbol)) => Ok(Element::Symbol(symbol.relation())),
            Slot::Segment(Segment::Name(name)) if paren_balance(&name) != 0 => Err(
                ParseError::malformed(text, format!("unbalanced parentheses in {name:?}")),
            ),
            Slot::Segment(Segment::Name(name)) => Ok(Element::Node(GenreNode::Leaf(name))),
        })
        .collect::<ParseResult<Vec<_>>>()?;

    if elements.len() == 1 {
        if let Some(Element::Node(node)) = elements.pop() {
            return Ok(node);
        }
    }

    let remaining: BTreeSet<Relation> = elements
        .iter()
        .filter_map(|e| match e {
            Element::Symbol(relation) => Some(*relation),
            Element::Node(_) => None,
        })
        .collect();
    if remaining.len() > 1 {
        debug!(?remaining, "mixed operators at one level");
        return Err(ParseError::AmbiguousGrouping {
            text: text.to_string(),
        });
    }

    Ok(GenreNode::Sequence(elements))
}

/// Spans of two or more segments enclosed by one pair of parentheses.
///
/// A span opens at a name starting with `(` and closes at the first name
/// where the parentheses balance. Parentheses that open and close within
/// one name belong to the name.
fn find_group_spans(text: &str, segments: &[Segment]) -> ParseResult<Vec<Range<usize>>> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start < segments.len() {
        let opens = matches!(&segments[start], Segment::Name(n) if n.starts_with('('));
        if !opens {
            start += 1;
            continue;
        }

        let mut depth = 0;
        let mut close = None;
        for (i, segment) in segments.iter().enumerate().skip(start) {
            depth += paren_balance(segment.text());
            if depth <= 0 {
                close = Some(i);
                break;
            }
        }
        let Some(end) = close else {
            return Err(ParseError::malformed(
                text,
                format!("unclosed parenthesis at segment {start}"),
            ));
        };

        if end > start && segments[end].text().ends_with(')') {
            spans.push(start..end + 1);
        }
        start = end + 1;
    }
    Ok(spans)
}

/// Text between the outer parentheses of a span.
fn inner_text(span: &[Segment]) -> String {
    let joined = segment::join(span);
    let inner = joined.strip_prefix('(').unwrap_or(joined.as_str());
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    inner.to_string()
}

fn paren_balance(text: &str) -> i32 {
    text.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}
