//! Operation identifiers and argument sets
//!
//! The closed set of remote operations the router can select, plus the typed
//! key/value bundle each one needs to execute.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A remote operation the router can dispatch to
///
/// The variant order here is the catalog priority order: when more than one
/// operation's rules match, the first one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Scrape a single page
    ScrapeWebsite,
    /// Crawl a site for multiple pages
    CrawlWebsite,
    /// Web search for a free-text query
    SearchWebsite,
    /// Enumerate links on a site, optionally filtered
    MapLinks,
    /// Structured extraction from one or more URLs
    ExtractContent,
    /// Deep recursive research on a query
    DeepAnalysis,
}

impl Operation {
    /// All operations in catalog priority order
    pub const ALL: [Operation; 6] = [
        Operation::ScrapeWebsite,
        Operation::CrawlWebsite,
        Operation::SearchWebsite,
        Operation::MapLinks,
        Operation::ExtractContent,
        Operation::DeepAnalysis,
    ];

    /// Wire name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ScrapeWebsite => "scrape_website",
            Operation::CrawlWebsite => "crawl_website",
            Operation::SearchWebsite => "search_website",
            Operation::MapLinks => "map_links",
            Operation::ExtractContent => "extract_content",
            Operation::DeepAnalysis => "deep_analysis",
        }
    }

    /// Parse from wire name
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "scrape_website" => Some(Operation::ScrapeWebsite),
            "crawl_website" => Some(Operation::CrawlWebsite),
            "search_website" => Some(Operation::SearchWebsite),
            "map_links" => Some(Operation::MapLinks),
            "extract_content" => Some(Operation::ExtractContent),
            "deep_analysis" => Some(Operation::DeepAnalysis),
            _ => None,
        }
    }

    /// Human-readable summary for CLI listings
    pub fn description(&self) -> &'static str {
        match self {
            Operation::ScrapeWebsite => "Scrape a single website URL",
            Operation::CrawlWebsite => "Crawl a website over multiple pages",
            Operation::SearchWebsite => "Search the web for a query",
            Operation::MapLinks => "Map the links on a website",
            Operation::ExtractContent => "Extract structured content from URLs",
            Operation::DeepAnalysis => "Deep research on a topic with recursive crawling",
        }
    }

    /// Argument names that must be present and non-empty before dispatch
    pub fn required_args(&self) -> &'static [&'static str] {
        match self {
            Operation::ScrapeWebsite => &["url"],
            Operation::CrawlWebsite => &["url", "limit"],
            Operation::SearchWebsite => &["query", "limit"],
            Operation::MapLinks => &["url", "limit", "search"],
            Operation::ExtractContent => &["urls", "prompt"],
            Operation::DeepAnalysis => &["query"],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single extracted argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(u64),
    Str(String),
    List(Vec<String>),
}

impl ArgValue {
    /// Whether the value counts as absent for validation purposes
    ///
    /// Only emptiness fails: zero integers and false booleans are still
    /// deliberate values (limits default to non-zero, flags are optional).
    pub fn is_empty(&self) -> bool {
        match self {
            ArgValue::Str(s) => s.is_empty(),
            ArgValue::List(v) => v.is_empty(),
            ArgValue::Int(_) | ArgValue::Bool(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ArgValue::List(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<u64> for ArgValue {
    fn from(n: u64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(v: Vec<String>) -> Self {
        ArgValue::List(v)
    }
}

/// Arguments extracted for one operation
///
/// Built incrementally by the extractor, scoped to a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSet(BTreeMap<String, ArgValue>);

impl ArgumentSet {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an argument value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style set, for tests and fixtures
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an argument by name
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    /// Check if an argument is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over name/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize to a JSON object suitable as a dispatch request body
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}
