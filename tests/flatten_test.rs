//! Integration tests for flattening and concurrent use of the parser.

use std::thread;

use rstest::rstest;

use genreguide::domain::{flatten, parse, GenreNode, ParseError};

/// Split an expression using one operator kind into names and operators.
fn split_tokens(input: &str, operator: &str) -> Vec<String> {
    let separator = format!(" {operator} ");
    let mut tokens = Vec::new();
    for (i, name) in input.split(separator.as_str()).enumerate() {
        if i > 0 {
            tokens.push(operator.to_string());
        }
        tokens.push(name.to_string());
    }
    tokens
}

#[rstest]
#[case("Space Bass")]
#[case("Drum & Bass")]
#[case("Witch House")]
fn given_plain_name_when_flattening_then_only_the_input(#[case] input: &str) {
    let parsed = parse(input).unwrap();

    let tokens: Vec<&str> = flatten(&parsed).collect();

    assert_eq!(tokens, vec![input]);
}

#[test]
fn given_uniform_chain_when_flattening_then_interleaves_operator() {
    let parsed = parse("Hybrid Trap | Brostep | Electropop").unwrap();

    let tokens: Vec<&str> = flatten(&parsed).collect();

    assert_eq!(
        tokens,
        vec!["Hybrid Trap", "|", "Brostep", "|", "Electropop"]
    );
}

#[rstest]
#[case(
    "Space Bass || Drum & Bass > Brostep",
    &["Space Bass", "|", "Drum & Bass", ">", "Brostep"]
)]
#[case(
    "(Space Bass ~ Post-Synthpop) | (Drum & Bass > Brostep)",
    &["Space Bass", "~", "Post-Synthpop", "|", "Drum & Bass", ">", "Brostep"]
)]
#[case(
    "Future Bass >> Wonky | Experimental >> Experimental Trap",
    &["Future Bass", ">", "Wonky", "|", "Experimental", ">", "Experimental Trap"]
)]
fn given_nested_tree_when_flattening_then_drops_structure(
    #[case] input: &str,
    #[case] expected: &[&str],
) {
    let parsed = parse(input).unwrap();
    assert_eq!(parsed.flat(), expected);
}

#[rstest]
#[case("Space Bass | Drum & Bass", "|")]
#[case("Bass House > Jungle Terror > Hybrid Trap", ">")]
#[case("Plunderphonics ~ IDM ~ Experimental ~ Noise", "~")]
#[case("Trap (EDM) | Phonk", "|")]
#[case("(Space Bass | Post-Synthpop) | Electro House", "|")]
#[case("Space Bass | Post-Synthpop)", "|")]
#[case("(Space Bass > Post-Synthpop", ">")]
#[case("(Complextro ~ Big Room) ~ (Commercial House ~ Electro House)", "~")]
fn given_single_operator_kind_when_flattening_then_matches_tokenization(
    #[case] input: &str,
    #[case] operator: &str,
) {
    let parsed = parse(input).unwrap();
    assert_eq!(parsed.flat(), split_tokens(input, operator));
}

#[test]
fn given_flatten_iterator_when_cloned_midway_then_both_continue_independently() {
    let parsed = parse("Space Bass || Drum & Bass > Brostep").unwrap();
    let mut walk = flatten(&parsed);
    assert_eq!(walk.next(), Some("Space Bass"));

    let fork = walk.clone();

    assert_eq!(walk.collect::<Vec<_>>(), vec!["|", "Drum & Bass", ">", "Brostep"]);
    assert_eq!(fork.collect::<Vec<_>>(), vec!["|", "Drum & Bass", ">", "Brostep"]);
}

#[test]
fn given_same_tree_when_flattening_twice_then_restarts_from_the_beginning() {
    let parsed = parse("Country > Post-Disco > Drumfunk").unwrap();

    let first: Vec<&str> = flatten(&parsed).collect();
    let second: Vec<&str> = flatten(&parsed).collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

// ============================================================
// Concurrency
// ============================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn given_parse_types_when_checking_bounds_then_send_and_sync() {
    assert_send_sync::<GenreNode>();
    assert_send_sync::<ParseError>();
}

#[test]
fn given_many_threads_when_parsing_then_each_gets_its_own_tree() {
    let inputs = [
        "Space Bass || Drum & Bass > Brostep",
        "Hybrid Trap | Brostep | Electropop",
        "(Space Bass | Post-Synthpop) > Electro House",
        "Moombahton || Tech House >> Wonky",
    ];

    let results: Vec<Result<Vec<String>, ParseError>> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || parse(input).map(|node| node.flat())))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for (input, result) in inputs.iter().zip(&results) {
        assert_eq!(result, &parse(input).map(|node| node.flat()));
    }
    assert!(results[3].is_err());
}
