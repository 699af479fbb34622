use crate::report::report_model::{ElementSummary, HitReport, LocatorReport, QueryReport};
use crate::tree::bounds::format_bounds;
use crate::tree::tree_model::{NodeId, UiTree};

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// One line per element:
/// ```text
/// #12 android.widget.Button [100,200][300,260] id=id/save_btn text="Save"
/// ```
pub fn format_element(summary: &ElementSummary) -> String {
    let mut line = format!("#{} {}", summary.index, summary.class);

    if let Some(bounds) = &summary.bounds {
        line.push_str(&format!(" {}", bounds));
    }
    if let Some(id) = &summary.resource_id {
        line.push_str(&format!(" id={}", id));
    }
    if let Some(text) = &summary.text {
        line.push_str(&format!(" text={:?}", text));
    }
    if let Some(desc) = &summary.content_desc {
        line.push_str(&format!(" desc={:?}", desc));
    }
    if summary.clickable {
        line.push_str(" clickable");
    }

    line
}

pub fn format_query_report(report: &QueryReport) -> String {
    let mut out = format!(
        "=== Query ({:?}): {} ===\n\n",
        report.grammar, report.query
    );

    for summary in &report.matches {
        out.push_str(&format!("  {}\n", format_element(summary)));
    }

    out.push_str(&format!("\n=== {} matches ===\n", report.total));
    out
}

pub fn format_hit_report(report: &HitReport) -> String {
    let mut out = format!("=== Point ({}, {}) ===\n\n", report.point.0, report.point.1);

    if report.candidates.is_empty() {
        out.push_str("  (no element under point)\n");
    }
    for (rank, summary) in report.candidates.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", rank + 1, format_element(summary)));
    }

    if let Some(exact) = &report.exact_matches {
        if exact.len() > 1 {
            out.push_str("\nStacked on the same bounds:\n");
            for summary in exact {
                out.push_str(&format!("  - {}\n", format_element(summary)));
            }
        }
    }
    if let Some(xpath) = &report.xpath {
        out.push_str(&format!("\nXPath:      {}\n", xpath));
    }
    if let Some(selector) = &report.ui_selector {
        out.push_str(&format!("UiSelector: {}\n", selector));
    }

    out
}

pub fn format_locator_report(report: &LocatorReport) -> String {
    let mut out = format!("{}\n\n", format_element(&report.element));
    out.push_str(&format!("XPath:      {}\n", report.xpath));
    out.push_str(&format!("UiSelector: {}\n", report.ui_selector));

    if report.xpath_matches != 1 {
        out.push_str(&format!(
            "Warning: XPath matches {} elements\n",
            report.xpath_matches
        ));
    }
    out
}

/// Indented outline of the whole hierarchy.
pub fn format_tree(tree: &UiTree) -> String {
    let mut out = String::new();
    write_subtree(tree, tree.root(), 0, &mut out);
    out
}

fn write_subtree(tree: &UiTree, id: NodeId, depth: usize, out: &mut String) {
    let node = tree.node(id);
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("#{} {}", node.id.0, node.tag));
    if let Some(bounds) = &node.bounds {
        out.push_str(&format!(" {}", format_bounds(bounds)));
    }
    if node.has_attr("resource-id") {
        out.push_str(&format!(" id={}", node.attr("resource-id")));
    }
    if node.has_attr("text") {
        out.push_str(&format!(" text={:?}", node.attr("text")));
    }
    out.push('\n');

    for child in &node.children {
        write_subtree(tree, *child, depth + 1, out);
    }
}
