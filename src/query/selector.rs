use std::sync::LazyLock;

use regex::Regex;

use crate::locator::locator_model::{MatchStrategy, ValueMatcher, attribute_for_method};
use crate::tree::tree_model::Node;

/// One `.method("value")` call of a chained selector.
#[derive(Debug, Clone)]
pub struct SelectorCondition {
    pub attribute: String,
    pub matcher: ValueMatcher,
}

impl SelectorCondition {
    pub fn holds(&self, node: &Node) -> bool {
        self.matcher.is_match(node.attr(&self.attribute))
    }
}

/// Conditions extracted from a chained selector, ANDed together.
#[derive(Debug, Clone, Default)]
pub struct SelectorQuery {
    pub conditions: Vec<SelectorCondition>,

    /// `.instance(n)`: keep only the n-th (0-based) match.
    pub instance: Option<usize>,
}

impl SelectorQuery {
    pub fn matches(&self, node: &Node) -> bool {
        self.conditions.iter().all(|c| c.holds(node))
    }
}

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\.\s*([A-Za-z_][A-Za-z0-9_]*)\s*\(\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'|(true|false|-?\d+))\s*\)"#,
    )
    .expect("selector call regex must compile")
});

/// Extract every literal-argument call from a chained selector.
///
/// Returns `None` when no call could be extracted, so the query can be
/// handed to the next grammar.
pub fn parse_selector(query: &str) -> Option<SelectorQuery> {
    let mut parsed = SelectorQuery::default();
    let mut found = false;

    for caps in CALL_RE.captures_iter(query) {
        let Some(method) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let value = match (caps.get(2), caps.get(3), caps.get(4)) {
            (Some(v), _, _) | (_, Some(v), _) => unescape(v.as_str()),
            (_, _, Some(v)) => v.as_str().to_string(),
            _ => continue,
        };
        found = true;

        if method == "instance" {
            parsed.instance = value.parse().ok();
            continue;
        }

        let (base, strategy) = MatchStrategy::split_selector_method(method);
        parsed.conditions.push(SelectorCondition {
            attribute: attribute_for_method(base),
            matcher: ValueMatcher::new(strategy, &value),
        });
    }

    found.then_some(parsed)
}

/// Turn the escape sequences of a Java string literal into the characters
/// they stand for.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
