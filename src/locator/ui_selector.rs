use crate::locator::locator_model::{SelectorOptions, selector_method};
use crate::locator::xpath::identifying_attribute;
use crate::tree::tree_model::{NodeId, UiTree};

/// Builder token opening a chained-selector locator.
pub const SELECTOR_WRAPPER: &str = "new UiSelector()";

/// Token whose presence marks a query as chained-selector syntax.
pub const SELECTOR_TOKEN: &str = "UiSelector";

/// Generate a chained-selector locator such as
/// `new UiSelector().resourceId("id/save").text("Save")`.
///
/// Nodes without any identifying attribute are located by class name.
pub fn generate_ui_selector(tree: &UiTree, id: NodeId, options: &SelectorOptions) -> String {
    let node = tree.node(id);

    let (attribute, value) =
        match identifying_attribute(node, options.preferred_attribute.as_deref()) {
            Some(attribute) => (attribute, node.attr(attribute)),
            None => ("class", node.tag.as_str()),
        };

    let mut calls = vec![format!(
        "{}{}({})",
        selector_method(attribute),
        options.strategy.selector_suffix(),
        quote(value)
    )];

    for extra in &options.extra_attributes {
        if extra != attribute && node.has_attr(extra) {
            calls.push(format!("{}({})", selector_method(extra), quote(node.attr(extra))));
        }
    }

    let chain = calls.join(".");
    if options.prefix {
        format!("{}.{}", SELECTOR_WRAPPER, chain)
    } else {
        chain
    }
}

/// Java string literal: escapes quotes, backslashes and control whitespace.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
