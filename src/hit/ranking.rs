use crate::tree::tree_model::Node;

type Rule = (fn(&Node) -> bool, u8);

/// Priority rules for elements stacked on the same rectangle, checked top to
/// bottom; the first rule that holds gives the score.
const PRIORITY_RULES: [Rule; 5] = [
    (has_description, 5),
    (has_resource_id, 4),
    (has_text, 3),
    (is_clickable, 2),
    (is_scrollable, 1),
];

pub fn priority_score(node: &Node) -> u8 {
    PRIORITY_RULES
        .iter()
        .find(|(rule, _)| rule(node))
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

fn has_description(node: &Node) -> bool {
    node.has_attr("content-desc")
}

fn has_resource_id(node: &Node) -> bool {
    node.has_attr("resource-id")
}

fn has_text(node: &Node) -> bool {
    node.has_attr("text")
}

fn is_clickable(node: &Node) -> bool {
    node.flag("clickable")
}

fn is_scrollable(node: &Node) -> bool {
    node.flag("scrollable")
}
