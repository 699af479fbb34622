use crate::locator::locator_model::{DEFAULT_PREFERENCE, MatchStrategy, XPathOptions};
use crate::tree::tree_model::{Node, NodeId, UiTree};

/// Generate a path-style locator for `id`.
///
/// Produces `//{tag}[{predicate}]` from the preferred (or first present
/// default) attribute. When the node carries none of them the result is the
/// absolute structural path `/{tag}[i]/...` from the root, which breaks as
/// soon as sibling order changes and should only be used as a last resort.
pub fn generate_xpath(tree: &UiTree, id: NodeId, options: &XPathOptions) -> String {
    let node = tree.node(id);

    let Some(attribute) = identifying_attribute(node, options.preferred_attribute.as_deref())
    else {
        return structural_path(tree, id);
    };

    let mut predicate = predicate(options.strategy, attribute, node.attr(attribute));

    for extra in &options.extra_attributes {
        if extra != attribute && node.has_attr(extra) {
            predicate.push_str(&format!(" and @{}={}", extra, quote(node.attr(extra))));
        }
    }

    format!("//{}[{}]", node.tag, predicate)
}

/// Absolute path from the root, indexing each step among same-tag siblings.
pub fn structural_path(tree: &UiTree, id: NodeId) -> String {
    let mut steps: Vec<String> = std::iter::once(tree.node(id))
        .chain(tree.ancestors(id))
        .map(|n| format!("/{}[{}]", n.tag, tree.sibling_index(n.id)))
        .collect();
    steps.reverse();
    steps.concat()
}

/// First attribute usable as an identifier: the preferred one if the node
/// has a value for it, else the default preference order.
pub(crate) fn identifying_attribute<'a>(node: &Node, preferred: Option<&'a str>) -> Option<&'a str> {
    preferred
        .filter(|p| node.has_attr(p))
        .or_else(|| DEFAULT_PREFERENCE.into_iter().find(|a| node.has_attr(a)))
}

fn predicate(strategy: MatchStrategy, attribute: &str, value: &str) -> String {
    let value = quote(value);
    match strategy {
        MatchStrategy::Equals => format!("@{}={}", attribute, value),
        MatchStrategy::Contains => format!("contains(@{},{})", attribute, value),
        MatchStrategy::StartsWith => format!("starts-with(@{},{})", attribute, value),
        MatchStrategy::EndsWith => format!("ends-with(@{},{})", attribute, value),
        MatchStrategy::Matches => format!("matches(@{},{})", attribute, value),
    }
}

/// Double quotes unless the value itself contains one. A value holding both
/// quote kinds becomes `concat(...)` with each `"` quoted on its own.
fn quote(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    if !value.contains('\'') {
        return format!("'{}'", value);
    }

    let mut pieces = Vec::new();
    for (i, part) in value.split('"').enumerate() {
        if i > 0 {
            pieces.push("'\"'".to_string());
        }
        if !part.is_empty() {
            pieces.push(format!("\"{}\"", part));
        }
    }
    format!("concat({})", pieces.join(", "))
}
