//! Provenance trees for produced strings.

use regex_enumerate::{enumerate_with_provenance, parse, snapshot_from_provenance, to_treeviz_str};

fn first_tree(pattern: &str) -> String {
    let pattern = parse(pattern).unwrap();
    let first = enumerate_with_provenance(&pattern)
        .next()
        .expect("pattern should produce a value");
    to_treeviz_str(&first).trim_end().to_string()
}

#[test]
fn concat_of_group_and_literal() {
    insta::assert_snapshot!(first_tree("(a|b)c"), @r#"
    Pattern "ac"
    └─ Concat "ac"
      ├─ Group #1 "a"
      │ └─ Disjunction "a"
      │   └─ Literal "a"
      └─ Literal "c"
    "#);
}

#[test]
fn repeated_draws_appear_once() {
    insta::assert_snapshot!(first_tree("[ab]{2}"), @r#"
    Pattern "aa"
    └─ Repetition {2,2} "aa"
      └─ CharClass "a"
        └─ ClassLiteral "a"
    "#);
}

#[test]
fn disjunction_of_groups() {
    let pattern = parse("(a|b)|(c|d)").unwrap();
    let trees: Vec<String> = enumerate_with_provenance(&pattern)
        .map(|provenance| to_treeviz_str(&provenance))
        .collect();
    assert_eq!(trees.len(), 4);
    insta::assert_snapshot!(trees[2].trim_end(), @r#"
    Pattern "c"
    └─ Disjunction "c"
      └─ Group #2 "c"
        └─ Disjunction "c"
          └─ Literal "c"
    "#);
}

#[test]
fn backreference_values_are_resolved_at_the_root() {
    let pattern = parse("(x)\\1").unwrap();
    let first = enumerate_with_provenance(&pattern).next().unwrap();
    assert_eq!(first.value, "xx");
    // the reference leaf keeps its placeholder; only the root is resolved
    let concat = &first.children[0];
    assert_eq!(concat.children.len(), 2);
    assert_eq!(concat.children[1].origin.label(), "Backreference \\1");
}

#[test]
fn snapshot_serializes_to_json() {
    let pattern = parse("[a-c]").unwrap();
    let second = enumerate_with_provenance(&pattern).nth(1).unwrap();
    let json = serde_json::to_value(snapshot_from_provenance(&second)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "node_type": "Pattern",
            "label": "Pattern",
            "value": "b",
            "children": [{
                "node_type": "CharClass",
                "label": "CharClass",
                "value": "b",
                "children": [{
                    "node_type": "ClassRange",
                    "label": "ClassRange a-c",
                    "value": "b",
                    "children": []
                }]
            }]
        })
    );
}
