use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::locator::locator_model::{MatchStrategy, SelectorOptions, XPathOptions};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "locator-inspector",
    version,
    about = "Inspect UI hierarchy dumps: hit-test, generate and evaluate element locators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: locator-inspector.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append trace events (JSON lines) to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Output format: console or json
    #[arg(long, default_value = "console", global = true)]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the hierarchy as an indented outline
    Tree {
        /// Hierarchy dump (XML, or JSON with a .json extension)
        #[arg(long)]
        dump: String,
    },

    /// List the elements under a screenshot point
    Hit {
        #[arg(long)]
        dump: String,

        #[arg(long, allow_hyphen_values = true)]
        x: i64,

        #[arg(long, allow_hyphen_values = true)]
        y: i64,

        /// Screenshot width in pixels (default: dump width)
        #[arg(long)]
        image_width: Option<i64>,

        /// Screenshot height in pixels (default: dump height)
        #[arg(long)]
        image_height: Option<i64>,

        /// Resolve as a click: rank stacked elements and print locators
        #[arg(long)]
        click: bool,
    },

    /// Generate locators for one element, by node index or by point
    Locate {
        #[arg(long)]
        dump: String,

        /// Node index as printed by `tree`
        #[arg(long, conflicts_with_all = ["x", "y"])]
        node: Option<usize>,

        #[arg(long, requires = "y")]
        x: Option<i64>,

        #[arg(long, requires = "x")]
        y: Option<i64>,

        /// Attribute to build the locator from
        #[arg(long)]
        attribute: Option<String>,

        /// Match strategy: equals, contains, starts-with, ends-with, matches
        #[arg(long)]
        strategy: Option<String>,

        /// Extra attributes to pin (comma separated)
        #[arg(long, value_delimiter = ',')]
        extra: Vec<String>,

        /// Print the UiSelector chain without the `new UiSelector()` wrapper
        #[arg(long)]
        bare: bool,
    },

    /// Evaluate a locator query (UiSelector chain, regex:, XPath or text)
    Query {
        #[arg(long)]
        dump: String,

        #[arg(long, allow_hyphen_values = true)]
        query: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `locator-inspector.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub locator: LocatorConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    pub preferred_attribute: Option<String>,

    #[serde(default)]
    pub strategy: MatchStrategy,

    #[serde(default)]
    pub extra_attributes: Vec<String>,

    #[serde(default = "default_true")]
    pub selector_prefix: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            preferred_attribute: None,
            strategy: MatchStrategy::Equals,
            extra_attributes: Vec::new(),
            selector_prefix: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

fn default_true() -> bool { true }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("locator-inspector.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

pub fn parse_strategy(name: &str) -> Option<MatchStrategy> {
    match name.to_lowercase().replace('_', "-").as_str() {
        "equals" => Some(MatchStrategy::Equals),
        "contains" => Some(MatchStrategy::Contains),
        "starts-with" => Some(MatchStrategy::StartsWith),
        "ends-with" => Some(MatchStrategy::EndsWith),
        "matches" => Some(MatchStrategy::Matches),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocatorOverrides {
    pub attribute: Option<String>,
    pub strategy: Option<MatchStrategy>,
    pub extra: Vec<String>,
    pub bare: bool,
}

/// Resolve XPath options: CLI > config > defaults.
pub fn build_xpath_options(config: &LocatorConfig, cli: &LocatorOverrides) -> XPathOptions {
    XPathOptions {
        preferred_attribute: cli
            .attribute
            .clone()
            .or_else(|| config.preferred_attribute.clone()),
        strategy: cli.strategy.unwrap_or(config.strategy),
        extra_attributes: if cli.extra.is_empty() {
            config.extra_attributes.clone()
        } else {
            cli.extra.clone()
        },
    }
}

pub fn build_selector_options(config: &LocatorConfig, cli: &LocatorOverrides) -> SelectorOptions {
    let xpath = build_xpath_options(config, cli);
    SelectorOptions {
        preferred_attribute: xpath.preferred_attribute,
        strategy: xpath.strategy,
        extra_attributes: xpath.extra_attributes,
        prefix: config.selector_prefix && !cli.bare,
    }
}
