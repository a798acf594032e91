//! Pattern catalog for operation selection
//!
//! An ordered mapping from operation to matching rules, compiled once at
//! startup. Catalog order is the priority order used during selection, so
//! adding an operation never touches selector control flow.

use regex::Regex;

use crate::error::{Result, RoutrError};

use super::operation::Operation;

/// Default matching rules, in catalog priority order
///
/// Rules are searched (not fully matched) against the lower-cased input, so
/// patterns are written in lower case.
const DEFAULT_RULES: &[(Operation, &[&str])] = &[
    (
        Operation::ScrapeWebsite,
        &[
            r"scrape?\s+(?:the\s+)?(?:website|page|url|site)",
            r"get\s+content\s+from",
            r"extract\s+(?:data|content|text)\s+from\s+(?:website|url|page)",
            r"fetch\s+(?:data|content)\s+from",
        ],
    ),
    (
        Operation::CrawlWebsite,
        &[
            r"crawl\s+(?:the\s+)?(?:website|site)",
            r"get\s+multiple\s+pages",
            r"crawl\s+\d+\s+pages",
            r"crawl.*limit.*\d+",
            r"spider\s+(?:the\s+)?website",
        ],
    ),
    (
        Operation::SearchWebsite,
        &[
            r"search\s+(?:for\s+)?(?:websites?|web|internet)",
            r"find\s+(?:websites?|pages?)\s+(?:about|with|containing)",
            r"search\s+(?:the\s+)?(?:web|internet)\s+for",
            r"web\s+search",
        ],
    ),
    (
        Operation::MapLinks,
        &[
            r"(?:map|find|get|list)\s+(?:all\s+)?links",
            r"discover\s+links",
            r"find\s+(?:all\s+)?(?:urls?|links)\s+(?:on|from)",
            r"map\s+(?:the\s+)?(?:website|site)\s+structure",
        ],
    ),
    (
        Operation::ExtractContent,
        &[
            r"extract\s+(?:structured\s+)?(?:data|content|information)",
            r"get\s+specific\s+(?:data|information)",
            r"parse\s+(?:data|content)\s+from",
            r"extract.*using.*(?:schema|structure|format)",
        ],
    ),
    (
        Operation::DeepAnalysis,
        &[
            r"(?:deep|thorough|comprehensive)\s+(?:analysis|research)",
            r"research\s+(?:about|on)",
            r"analyze\s+(?:deeply|thoroughly)",
            r"in-depth\s+(?:analysis|research|study)",
        ],
    ),
];

/// Ordered catalog of compiled pattern rules
#[derive(Debug)]
pub struct PatternCatalog {
    entries: Vec<(Operation, Vec<Regex>)>,
}

impl PatternCatalog {
    /// Build the catalog from the default rule set
    pub fn new() -> Result<Self> {
        Self::from_rules(DEFAULT_RULES)
    }

    /// Build a catalog from explicit rules, preserving their order
    pub fn from_rules(rules: &[(Operation, &[&str])]) -> Result<Self> {
        let mut entries = Vec::with_capacity(rules.len());
        for (operation, patterns) in rules {
            let mut compiled = Vec::with_capacity(patterns.len());
            for pattern in *patterns {
                let regex = Regex::new(pattern).map_err(|e| {
                    RoutrError::Catalog(format!("Invalid pattern '{}' for {}: {}", pattern, operation, e))
                })?;
                compiled.push(regex);
            }
            entries.push((*operation, compiled));
        }
        Ok(Self { entries })
    }

    /// Iterate (operation, rules) pairs in priority order
    pub fn entries(&self) -> impl Iterator<Item = (Operation, &[Regex])> {
        self.entries.iter().map(|(op, rules)| (*op, rules.as_slice()))
    }

    /// Get the rules for one operation
    pub fn rules_for(&self, operation: Operation) -> Option<&[Regex]> {
        self.entries
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Number of operations in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
