use serde::Serialize;

use crate::coords::reconcile::reconcile;
use crate::hit::hit_test::{Selection, query, select};
use crate::inspector::error::InspectorError;
use crate::locator::locator_model::{SelectorOptions, XPathOptions};
use crate::locator::ui_selector::generate_ui_selector;
use crate::locator::xpath::generate_xpath;
use crate::query::evaluator::evaluate_parsed;
use crate::query::grammar::parse_query;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{Operation, TraceEvent, capture_fingerprint};
use crate::tree::tree_model::{NodeId, Rect, UiTree};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locators {
    pub xpath: String,
    pub ui_selector: String,
}

/// A click resolved to a node, with the locators of the default choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick {
    pub selection: Selection,
    pub locators: Locators,
}

/// One capture (screenshot + hierarchy dump) and the interactions against
/// it. Replace the whole value on refresh; node ids do not carry over.
pub struct Inspector {
    tree: UiTree,
    capture: String,
    image_size: (i64, i64),
    dump_size: (i64, i64),
    xpath_options: XPathOptions,
    selector_options: SelectorOptions,
    tracer: TraceLogger,
}

impl Inspector {
    pub fn new(tree: UiTree, image_width: i64, image_height: i64) -> Self {
        let dump_size = tree
            .node(tree.root())
            .bounds
            .map(|b| (b.right(), b.bottom()))
            .unwrap_or((image_width, image_height));

        Self {
            tree,
            capture: String::new(),
            image_size: (image_width, image_height),
            dump_size,
            xpath_options: XPathOptions::default(),
            selector_options: SelectorOptions::default(),
            tracer: TraceLogger::disabled(),
        }
    }

    /// Build from raw XML dump text; the capture is fingerprinted for tracing.
    pub fn from_xml(xml: &str, image_width: i64, image_height: i64) -> Result<Self, InspectorError> {
        let tree = UiTree::from_xml(xml)?;
        let mut inspector = Self::new(tree, image_width, image_height);
        inspector.capture = capture_fingerprint(xml);
        Ok(inspector)
    }

    pub fn with_capture(mut self, fingerprint: impl Into<String>) -> Self {
        self.capture = fingerprint.into();
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn with_xpath_options(mut self, options: XPathOptions) -> Self {
        self.xpath_options = options;
        self
    }

    pub fn with_selector_options(mut self, options: SelectorOptions) -> Self {
        self.selector_options = options;
        self
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn capture(&self) -> &str {
        &self.capture
    }

    pub fn dump_size(&self) -> (i64, i64) {
        self.dump_size
    }

    /// Candidates under an image-pixel point, smallest first.
    pub fn hover(&self, x: i64, y: i64) -> Vec<NodeId> {
        let (dx, dy) = self.to_dump_point(x, y);
        let candidates = query(&self.tree, dx, dy);

        self.tracer.log(
            &TraceEvent::now(Operation::Hover, &self.capture)
                .with_point(x, y)
                .with_matches(&candidates),
        );
        candidates
    }

    pub fn click(&self, x: i64, y: i64) -> Option<Pick> {
        let (dx, dy) = self.to_dump_point(x, y);
        let selection = select(&self.tree, dx, dy);

        let mut event = TraceEvent::now(Operation::Click, &self.capture).with_point(x, y);
        let pick = selection.map(|selection| {
            let locators = self.locators(selection.selected());
            Pick {
                selection,
                locators,
            }
        });

        if let Some(pick) = &pick {
            event = event
                .with_matches(&pick.selection.exact_matches)
                .with_locator(&pick.locators.xpath);
        }
        self.tracer.log(&event);
        pick
    }

    pub fn locators(&self, id: NodeId) -> Locators {
        Locators {
            xpath: generate_xpath(&self.tree, id, &self.xpath_options),
            ui_selector: generate_ui_selector(&self.tree, id, &self.selector_options),
        }
    }

    /// Like [`Inspector::locators`] but rejects ids from another tree.
    pub fn locators_for(&self, id: NodeId) -> Result<Locators, InspectorError> {
        if self.tree.get(id).is_none() {
            return Err(InspectorError::UnknownNode(format!(
                "node {} (tree has {} nodes)",
                id.0,
                self.tree.len()
            )));
        }
        let locators = self.locators(id);
        self.tracer.log(
            &TraceEvent::now(Operation::Generate, &self.capture)
                .with_matches(&[id])
                .with_locator(&locators.xpath),
        );
        Ok(locators)
    }

    pub fn find(&self, locator: &str) -> Vec<NodeId> {
        let parsed = parse_query(locator);
        let matches = evaluate_parsed(&self.tree, &parsed);

        self.tracer.log(
            &TraceEvent::now(Operation::Query, &self.capture)
                .with_query(locator, parsed.grammar())
                .with_matches(&matches),
        );
        matches
    }

    /// Matches of `locator` with their overlay rectangles in the image frame.
    /// Matches without bounds are left out.
    pub fn highlight(&self, locator: &str) -> Vec<(NodeId, Rect)> {
        self.find(locator)
            .into_iter()
            .filter_map(|id| self.overlay_rect(id).map(|r| (id, r)))
            .collect()
    }

    pub fn overlay_rect(&self, id: NodeId) -> Option<Rect> {
        let bounds = self.tree.get(id)?.bounds?;
        let (dw, dh) = self.dump_size;
        let (iw, ih) = self.image_size;
        Some(reconcile(bounds, dw, dh, iw, ih))
    }

    fn to_dump_point(&self, x: i64, y: i64) -> (i64, i64) {
        let (dw, dh) = self.dump_size;
        let (iw, ih) = self.image_size;
        let p = reconcile(Rect::new(x, y, 0, 0), iw, ih, dw, dh);
        (p.x, p.y)
    }
}
