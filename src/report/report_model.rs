use serde::Serialize;

use crate::query::grammar::Grammar;
use crate::tree::bounds::format_bounds;
use crate::tree::tree_model::{Node, UiTree};

// ============================================================================
// Element summaries: property-panel view of a node
// ============================================================================

/// Flat view of one node, carrying the attributes a property panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ElementSummary {
    pub index: usize,
    pub depth: usize,
    pub class: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_desc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<String>,

    pub clickable: bool,
    pub enabled: bool,
    pub scrollable: bool,
    pub checkable: bool,
    pub checked: bool,
    pub focusable: bool,
    pub focused: bool,
    pub long_clickable: bool,
    pub password: bool,
    pub selected: bool,
}

impl ElementSummary {
    pub fn from_node(tree: &UiTree, node: &Node) -> Self {
        let value = |name: &str| Some(node.attr(name).to_string()).filter(|v| !v.is_empty());

        Self {
            index: node.id.0,
            depth: tree.depth(node.id),
            class: node.tag.clone(),
            resource_id: value("resource-id"),
            text: value("text"),
            content_desc: value("content-desc"),
            package: value("package"),
            bounds: node.bounds.as_ref().map(format_bounds),
            clickable: node.flag("clickable"),
            enabled: node.flag("enabled"),
            scrollable: node.flag("scrollable"),
            checkable: node.flag("checkable"),
            checked: node.flag("checked"),
            focusable: node.flag("focusable"),
            focused: node.flag("focused"),
            long_clickable: node.flag("long-clickable"),
            password: node.flag("password"),
            selected: node.flag("selected"),
        }
    }
}

// ============================================================================
// Query and hit-test reports
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub grammar: Grammar,
    pub total: usize,
    pub matches: Vec<ElementSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HitReport {
    pub point: (i64, i64),
    pub candidates: Vec<ElementSummary>,

    /// Present for clicks: the stacked elements sharing the best rectangle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_matches: Option<Vec<ElementSummary>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_selector: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocatorReport {
    pub element: ElementSummary,
    pub xpath: String,
    pub ui_selector: String,

    /// How many nodes the generated path locator finds again.
    pub xpath_matches: usize,
}
