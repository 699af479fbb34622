use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::locator::ui_selector::SELECTOR_TOKEN;
use crate::query::selector::{SelectorQuery, parse_selector};

/// Prefix selecting the free regular-expression grammar.
pub const REGEX_PREFIX: &str = "regex:";

/// Query grammar families, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    Empty,
    ChainedSelector,
    RegexPrefix,
    Path,
    Substring,
}

/// A query string after grammar detection.
#[derive(Debug, Clone)]
pub enum ParsedQuery {
    /// Blank input; matches nothing without walking the tree.
    Empty,

    ChainedSelector(SelectorQuery),

    /// `None` when the pattern does not compile.
    RegexPrefix(Option<Regex>),

    /// Trimmed query text starting with `/`.
    Path(String),

    Substring(String),
}

impl ParsedQuery {
    pub fn grammar(&self) -> Grammar {
        match self {
            ParsedQuery::Empty => Grammar::Empty,
            ParsedQuery::ChainedSelector(_) => Grammar::ChainedSelector,
            ParsedQuery::RegexPrefix(_) => Grammar::RegexPrefix,
            ParsedQuery::Path(_) => Grammar::Path,
            ParsedQuery::Substring(_) => Grammar::Substring,
        }
    }
}

/// Detect the grammar of `query`. The order is fixed:
///
/// 1. chained selector, when the `UiSelector` token appears anywhere and at
///    least one call can be extracted
/// 2. `regex:` prefix
/// 3. path syntax, when the query starts with `/`
/// 4. substring search over identifying fields
pub fn parse_query(query: &str) -> ParsedQuery {
    let query = query.trim();

    if query.is_empty() {
        return ParsedQuery::Empty;
    }

    if query.contains(SELECTOR_TOKEN) {
        if let Some(selector) = parse_selector(query) {
            return ParsedQuery::ChainedSelector(selector);
        }
    }

    if let Some(pattern) = strip_regex_prefix(query) {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok();
        return ParsedQuery::RegexPrefix(compiled);
    }

    if query.starts_with('/') {
        return ParsedQuery::Path(query.to_string());
    }

    ParsedQuery::Substring(query.to_string())
}

/// `regex:` in any case; whitespace after the colon is not part of the pattern.
fn strip_regex_prefix(query: &str) -> Option<&str> {
    let head = query.get(..REGEX_PREFIX.len())?;
    head.eq_ignore_ascii_case(REGEX_PREFIX)
        .then(|| query[REGEX_PREFIX.len()..].trim_start())
}
