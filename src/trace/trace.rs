use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::query::grammar::Grammar;
use crate::tree::tree_model::NodeId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Hover,
    Click,
    Query,
    Generate,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub operation: Operation,

    /// Fingerprint of the capture the operation ran against.
    pub capture: String,

    pub point: Option<(i64, i64)>,
    pub query: Option<String>,
    pub grammar: Option<Grammar>,

    pub match_count: usize,
    pub top_node: Option<NodeId>,
    pub locator: Option<String>,
}

impl TraceEvent {
    pub fn now(operation: Operation, capture: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            operation,
            capture: capture.to_string(),
            point: None,
            query: None,
            grammar: None,
            match_count: 0,
            top_node: None,
            locator: None,
        }
    }

    pub fn with_point(mut self, x: i64, y: i64) -> Self {
        self.point = Some((x, y));
        self
    }

    pub fn with_query(mut self, query: &str, grammar: Grammar) -> Self {
        self.query = Some(query.to_string());
        self.grammar = Some(grammar);
        self
    }

    pub fn with_matches(mut self, matches: &[NodeId]) -> Self {
        self.match_count = matches.len();
        self.top_node = matches.first().copied();
        self
    }

    pub fn with_locator(mut self, locator: impl ToString) -> Self {
        self.locator = Some(locator.to_string());
        self
    }
}

/// SHA-1 of the raw dump text, identifying one capture.
pub fn capture_fingerprint(raw_dump: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(raw_dump.as_bytes());
    format!("{:x}", hasher.finalize())
}
