use regex::Regex;
use serde::{Deserialize, Serialize};

/// Attributes tried, in order, when no preferred attribute is requested.
pub const DEFAULT_PREFERENCE: [&str; 3] = ["resource-id", "text", "content-desc"];

/// How a locator compares an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    /// `expected` is a regular expression, matched anywhere in the value.
    Matches,
}

impl MatchStrategy {
    /// Compare `actual` against `expected`. An invalid pattern never matches.
    pub fn test(&self, actual: &str, expected: &str) -> bool {
        ValueMatcher::new(*self, expected).is_match(actual)
    }

    /// Method-name suffix in the chained-selector grammar.
    pub fn selector_suffix(&self) -> &'static str {
        match self {
            MatchStrategy::Equals => "",
            MatchStrategy::Contains => "Contains",
            MatchStrategy::StartsWith => "StartsWith",
            MatchStrategy::EndsWith => "EndsWith",
            MatchStrategy::Matches => "Matches",
        }
    }

    /// Split `textStartsWith` into (`text`, StartsWith). Methods without a
    /// known suffix compare with Equals.
    pub fn split_selector_method(method: &str) -> (&str, MatchStrategy) {
        let suffixed = [
            MatchStrategy::StartsWith,
            MatchStrategy::EndsWith,
            MatchStrategy::Contains,
            MatchStrategy::Matches,
        ];

        for strategy in suffixed {
            if let Some(base) = method.strip_suffix(strategy.selector_suffix()) {
                if !base.is_empty() {
                    return (base, strategy);
                }
            }
        }
        (method, MatchStrategy::Equals)
    }
}

/// A strategy bound to its expected value, with `Matches` patterns compiled
/// once up front.
#[derive(Debug, Clone)]
pub struct ValueMatcher {
    strategy: MatchStrategy,
    expected: String,
    pattern: Option<Regex>,
}

impl ValueMatcher {
    pub fn new(strategy: MatchStrategy, expected: &str) -> Self {
        let pattern = match strategy {
            MatchStrategy::Matches => Regex::new(expected).ok(),
            _ => None,
        };
        Self {
            strategy,
            expected: expected.to_string(),
            pattern,
        }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn is_match(&self, actual: &str) -> bool {
        match self.strategy {
            MatchStrategy::Equals => actual == self.expected,
            MatchStrategy::Contains => actual.contains(&self.expected),
            MatchStrategy::StartsWith => actual.starts_with(&self.expected),
            MatchStrategy::EndsWith => actual.ends_with(&self.expected),
            MatchStrategy::Matches => self
                .pattern
                .as_ref()
                .is_some_and(|re| re.is_match(actual)),
        }
    }
}

/// Options for path-style locator generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XPathOptions {
    /// Attribute to build the predicate from; falls back to
    /// [`DEFAULT_PREFERENCE`] when absent or empty on the node.
    #[serde(default)]
    pub preferred_attribute: Option<String>,

    #[serde(default)]
    pub strategy: MatchStrategy,

    /// Extra attributes appended as Equals clauses when the node carries them.
    #[serde(default)]
    pub extra_attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorOptions {
    #[serde(default)]
    pub preferred_attribute: Option<String>,

    #[serde(default)]
    pub strategy: MatchStrategy,

    #[serde(default)]
    pub extra_attributes: Vec<String>,

    /// Emit the `new UiSelector()` wrapper; `false` gives the bare chain.
    #[serde(default = "default_true")]
    pub prefix: bool,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            preferred_attribute: None,
            strategy: MatchStrategy::Equals,
            extra_attributes: Vec::new(),
            prefix: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Chained-selector method for a dump attribute name.
pub fn selector_method(attribute: &str) -> String {
    match attribute {
        "resource-id" => "resourceId".to_string(),
        "content-desc" => "description".to_string(),
        "text" => "text".to_string(),
        "class" => "className".to_string(),
        "package" => "packageName".to_string(),
        other => hyphen_to_camel(other),
    }
}

pub fn attribute_for_method(method: &str) -> String {
    match method {
        "resourceId" => "resource-id".to_string(),
        "description" => "content-desc".to_string(),
        "text" => "text".to_string(),
        "className" => "class".to_string(),
        "packageName" => "package".to_string(),
        other => camel_to_hyphen(other),
    }
}

fn hyphen_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn camel_to_hyphen(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
