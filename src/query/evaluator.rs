use crate::locator::locator_model::XPathOptions;
use crate::locator::xpath::generate_xpath;
use crate::query::grammar::{ParsedQuery, parse_query};
use crate::query::path::parse_path;
use crate::tree::tree_model::{Node, NodeId, UiTree};

/// Fields searched by a plain substring query, besides the tag.
const SUBSTRING_FIELDS: [&str; 4] = ["resource-id", "content-desc", "text", "class"];

/// Evaluate a locator of any supported grammar; matches come back in
/// document order.
pub fn evaluate(tree: &UiTree, query: &str) -> Vec<NodeId> {
    evaluate_parsed(tree, &parse_query(query))
}

pub fn evaluate_parsed(tree: &UiTree, query: &ParsedQuery) -> Vec<NodeId> {
    match query {
        ParsedQuery::Empty => Vec::new(),

        ParsedQuery::ChainedSelector(selector) => {
            let matches = collect(tree, |n| selector.matches(n));
            match selector.instance {
                Some(instance) => matches.into_iter().nth(instance).into_iter().collect(),
                None => matches,
            }
        }

        ParsedQuery::RegexPrefix(None) => Vec::new(),
        ParsedQuery::RegexPrefix(Some(pattern)) => collect(tree, |n| {
            pattern.is_match(&n.tag) || n.attributes.values().any(|v| pattern.is_match(v))
        }),

        ParsedQuery::Path(path) => evaluate_path(tree, path),

        // Unlike the other grammars this is an OR: any one field is enough.
        ParsedQuery::Substring(needle) => collect(tree, |n| {
            n.tag.contains(needle.as_str())
                || SUBSTRING_FIELDS
                    .iter()
                    .any(|f| n.attr(f).contains(needle.as_str()))
        }),
    }
}

/// Exact comparison against each node's generated locator first, so any
/// locator this crate generates finds its node again; then a structural
/// reading of `//tag[...]`.
fn evaluate_path(tree: &UiTree, path: &str) -> Vec<NodeId> {
    let defaults = XPathOptions::default();
    let exact = collect(tree, |n| generate_xpath(tree, n.id, &defaults) == path);
    if !exact.is_empty() {
        return exact;
    }

    match parse_path(path) {
        Some(structural) => collect(tree, |n| structural.matches(n)),
        None => Vec::new(),
    }
}

fn collect(tree: &UiTree, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
    tree.iter().filter(|&n| predicate(n)).map(|n| n.id).collect()
}
