use std::sync::LazyLock;

use regex::Regex;

use crate::locator::locator_model::{MatchStrategy, ValueMatcher};
use crate::tree::tree_model::Node;

const ATTR: &str = r"@([\w:.-]+)";
const LITERAL: &str = r#"(?:"([^"]*)"|'([^']*)'|concat\(\s*((?:"[^"]*"|'[^']*')(?:\s*,\s*(?:"[^"]*"|'[^']*'))+)\s*\))"#;

static CONCAT_PIECE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("concat piece regex must compile")
});

static EQUALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{ATTR}\s*=\s*{LITERAL}$")).expect("equals regex must compile")
});

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(contains|starts-with|ends-with|matches)\(\s*{ATTR}\s*,\s*{LITERAL}\s*\)$"
    ))
    .expect("function regex must compile")
});

static SUBSTRING_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^substring\(\s*{ATTR}\s*,\s*(?:string-)?length\(\s*{ATTR}\s*\)\s*-\s*(?:string-)?length\(\s*{LITERAL}\s*\)\s*\+\s*1\s*\)\s*=\s*{LITERAL}$"
    ))
    .expect("substring suffix regex must compile")
});

/// One predicate of a `//tag[...]` expression.
#[derive(Debug, Clone)]
pub struct PathCondition {
    pub attribute: String,
    pub matcher: ValueMatcher,
}

/// A single-step `//{tag}[{conditions}]` expression.
#[derive(Debug, Clone)]
pub struct PathQuery {
    pub tag: String,
    pub conditions: Vec<PathCondition>,
}

impl PathQuery {
    pub fn matches(&self, node: &Node) -> bool {
        self.matches_tag(node)
            && self
                .conditions
                .iter()
                .all(|c| c.matcher.is_match(node.attr(&c.attribute)))
    }

    fn matches_tag(&self, node: &Node) -> bool {
        self.tag == "*"
            || self.tag == node.tag
            || self.tag == node.short_tag()
            || self.tag == node.attr("class")
    }
}

/// Parse `//tag` or `//tag[cond and cond ...]`.
///
/// Returns `None` when the expression has another shape or any condition is
/// not one of the supported forms; such a query matches nothing.
pub fn parse_path(query: &str) -> Option<PathQuery> {
    let rest = query.trim().strip_prefix("//")?;
    let tag_end = rest.find('[').unwrap_or(rest.len());
    let tag = rest[..tag_end].trim();

    if tag.is_empty() || tag.contains(['/', ' ', ']']) {
        return None;
    }

    let predicates = rest[tag_end..].trim();
    let conditions = if predicates.is_empty() {
        Vec::new()
    } else {
        let inner = predicates.strip_prefix('[')?.strip_suffix(']')?;
        split_and(inner)
            .into_iter()
            .map(parse_condition)
            .collect::<Option<Vec<_>>>()?
    };

    Some(PathQuery {
        tag: tag.to_string(),
        conditions,
    })
}

/// Split on the `and` keyword (any case) outside quotes and parentheses.
fn split_and(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut parts = Vec::new();
    let mut quote: Option<u8> = None;
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
        } else if b == b'"' || b == b'\'' {
            quote = Some(b);
        } else if b == b'(' {
            depth += 1;
        } else if b == b')' {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && is_and_keyword(bytes, i) {
            parts.push(inner[start..i].trim());
            i += 5;
            start = i;
            continue;
        }
        i += 1;
    }

    parts.push(inner[start..].trim());
    parts
}

/// ` and ` at `i`, with whitespace on both sides.
fn is_and_keyword(bytes: &[u8], i: usize) -> bool {
    bytes.len() >= i + 5
        && bytes[i].is_ascii_whitespace()
        && bytes[i + 1..i + 4].eq_ignore_ascii_case(b"and")
        && bytes[i + 4].is_ascii_whitespace()
}

fn parse_condition(raw: &str) -> Option<PathCondition> {
    parse_equals(raw)
        .or_else(|| parse_function(raw))
        .or_else(|| parse_substring_suffix(raw))
}

/// A quoted literal or a `concat(...)` of quoted pieces, starting at
/// capture group `first`.
fn literal(caps: &regex::Captures<'_>, first: usize) -> Option<String> {
    if let Some(m) = caps.get(first).or_else(|| caps.get(first + 1)) {
        return Some(m.as_str().to_string());
    }
    let pieces = caps.get(first + 2)?;
    Some(
        CONCAT_PIECE_RE
            .captures_iter(pieces.as_str())
            .filter_map(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| m.as_str())
            .collect(),
    )
}

/// `@attr="value"`
fn parse_equals(raw: &str) -> Option<PathCondition> {
    let caps = EQUALS_RE.captures(raw)?;
    Some(PathCondition {
        attribute: caps[1].to_string(),
        matcher: ValueMatcher::new(MatchStrategy::Equals, &literal(&caps, 2)?),
    })
}

/// `contains(@attr,"v")`, `starts-with`, `ends-with`, `matches`
fn parse_function(raw: &str) -> Option<PathCondition> {
    let caps = FUNCTION_RE.captures(raw)?;
    let strategy = match &caps[1] {
        "contains" => MatchStrategy::Contains,
        "starts-with" => MatchStrategy::StartsWith,
        "ends-with" => MatchStrategy::EndsWith,
        _ => MatchStrategy::Matches,
    };
    Some(PathCondition {
        attribute: caps[2].to_string(),
        matcher: ValueMatcher::new(strategy, &literal(&caps, 3)?),
    })
}

/// XPath 1.0 spelling of ends-with:
/// `substring(@a, string-length(@a) - string-length("v") + 1) = "v"`.
/// Only accepted when both attributes and both literals agree.
fn parse_substring_suffix(raw: &str) -> Option<PathCondition> {
    let caps = SUBSTRING_SUFFIX_RE.captures(raw)?;
    let suffix = literal(&caps, 3)?;

    if caps[1] != caps[2] || literal(&caps, 6)? != suffix {
        return None;
    }

    Some(PathCondition {
        attribute: caps[1].to_string(),
        matcher: ValueMatcher::new(MatchStrategy::EndsWith, &suffix),
    })
}
