use std::path::Path;

use crate::inspector::error::InspectorError;
use crate::inspector::inspector::Inspector;
use crate::locator::locator_model::{SelectorOptions, XPathOptions};
use crate::query::evaluator::evaluate;
use crate::query::grammar::parse_query;
use crate::report::console::{
    format_hit_report, format_locator_report, format_query_report, format_tree,
};
use crate::report::report_model::{ElementSummary, HitReport, LocatorReport, QueryReport};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::capture_fingerprint;
use crate::tree::tree_model::{NodeId, UiTree};

/// How the command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

/// A dump read from disk with the fingerprint of its raw text.
#[derive(Debug)]
pub struct LoadedDump {
    pub tree: UiTree,
    pub fingerprint: String,
}

/// Read a hierarchy dump: JSON when the extension is `.json`, XML otherwise.
pub fn load_dump(path: &str) -> Result<LoadedDump, InspectorError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InspectorError::Io {
        path: path.to_string(),
        source,
    })?;

    let is_json = Path::new(path)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let tree = if is_json {
        UiTree::from_json(&raw)?
    } else {
        UiTree::from_xml(&raw)?
    };

    Ok(LoadedDump {
        tree,
        fingerprint: capture_fingerprint(&raw),
    })
}

/// Open the tracer named on the command line or in config, if any.
pub fn build_tracer(path: Option<&str>) -> TraceLogger {
    match path {
        Some(p) => TraceLogger::new(p),
        None => TraceLogger::disabled(),
    }
}

/// Settings shared by every subcommand.
pub struct CommandContext {
    pub format: OutputFormat,
    pub verbose: u8,
    pub tracer: TraceLogger,
    pub xpath: XPathOptions,
    pub selector: SelectorOptions,
}

fn open_inspector(dump: LoadedDump, image: Option<(i64, i64)>, ctx: CommandContext) -> Inspector {
    let root_extent = dump
        .tree
        .node(dump.tree.root())
        .bounds
        .map(|b| (b.right(), b.bottom()))
        .unwrap_or((0, 0));
    let (w, h) = image.unwrap_or(root_extent);

    Inspector::new(dump.tree, w, h)
        .with_capture(dump.fingerprint)
        .with_tracer(ctx.tracer)
        .with_xpath_options(ctx.xpath)
        .with_selector_options(ctx.selector)
}

fn render<T: serde::Serialize>(
    format: OutputFormat,
    value: &T,
    console: impl FnOnce(&T) -> String,
) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
        OutputFormat::Console => Ok(console(value)),
    }
}

fn summaries(tree: &UiTree, ids: &[NodeId]) -> Vec<ElementSummary> {
    ids.iter()
        .map(|id| ElementSummary::from_node(tree, tree.node(*id)))
        .collect()
}

// ============================================================================
// tree subcommand
// ============================================================================

pub fn cmd_tree(dump_path: &str, ctx: CommandContext) -> Result<String, Box<dyn std::error::Error>> {
    let dump = load_dump(dump_path)?;

    if ctx.verbose > 0 {
        eprintln!("Loaded {} nodes from {}", dump.tree.len(), dump_path);
    }

    match ctx.format {
        OutputFormat::Json => {
            let all: Vec<ElementSummary> = dump
                .tree
                .iter()
                .map(|n| ElementSummary::from_node(&dump.tree, n))
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&all)?))
        }
        OutputFormat::Console => Ok(format_tree(&dump.tree)),
    }
}

// ============================================================================
// hit subcommand
// ============================================================================

pub fn cmd_hit(
    dump_path: &str,
    x: i64,
    y: i64,
    image: Option<(i64, i64)>,
    click: bool,
    ctx: CommandContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let format = ctx.format;
    let inspector = open_inspector(load_dump(dump_path)?, image, ctx);
    let tree = inspector.tree();

    let report = if click {
        let pick = inspector.click(x, y);
        HitReport {
            point: (x, y),
            candidates: pick
                .as_ref()
                .map(|p| summaries(tree, &p.selection.candidates))
                .unwrap_or_default(),
            exact_matches: pick
                .as_ref()
                .map(|p| summaries(tree, &p.selection.exact_matches)),
            xpath: pick.as_ref().map(|p| p.locators.xpath.clone()),
            ui_selector: pick.as_ref().map(|p| p.locators.ui_selector.clone()),
        }
    } else {
        HitReport {
            point: (x, y),
            candidates: summaries(tree, &inspector.hover(x, y)),
            exact_matches: None,
            xpath: None,
            ui_selector: None,
        }
    };

    render(format, &report, format_hit_report)
}

// ============================================================================
// locate subcommand
// ============================================================================

/// Which element `locate` works on.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    Node(usize),
    Point(i64, i64),
}

pub fn cmd_locate(
    dump_path: &str,
    target: Target,
    ctx: CommandContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let format = ctx.format;
    let inspector = open_inspector(load_dump(dump_path)?, None, ctx);
    let tree = inspector.tree();

    let id = match target {
        Target::Node(index) => NodeId(index),
        Target::Point(x, y) => inspector
            .click(x, y)
            .map(|p| p.selection.selected())
            .ok_or_else(|| {
                InspectorError::UnknownNode(format!("no element under ({}, {})", x, y))
            })?,
    };

    let locators = inspector.locators_for(id)?;
    let report = LocatorReport {
        element: ElementSummary::from_node(tree, tree.node(id)),
        xpath_matches: evaluate(tree, &locators.xpath).len(),
        xpath: locators.xpath,
        ui_selector: locators.ui_selector,
    };

    render(format, &report, format_locator_report)
}

// ============================================================================
// query subcommand
// ============================================================================

pub fn cmd_query(
    dump_path: &str,
    query: &str,
    ctx: CommandContext,
) -> Result<String, Box<dyn std::error::Error>> {
    let format = ctx.format;
    let inspector = open_inspector(load_dump(dump_path)?, None, ctx);
    let tree = inspector.tree();

    let matches = inspector.find(query);
    let report = QueryReport {
        query: query.to_string(),
        grammar: parse_query(query).grammar(),
        total: matches.len(),
        matches: summaries(tree, &matches),
    };

    render(format, &report, format_query_report)
}
