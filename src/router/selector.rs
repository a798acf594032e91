//! Operation selection from free text
//!
//! First pass walks the pattern catalog in priority order; if nothing
//! matches, keyword heuristics guess from URL-ish substrings and intent
//! words. Pure function of the input text and the static catalog.

use super::catalog::PatternCatalog;
use super::operation::Operation;

/// Substrings that suggest the input carries a URL
const URL_HINTS: [&str; 5] = ["http", "www", ".com", ".org", ".net"];

/// Intent words that push a URL-bearing input toward crawling
const CRAWL_HINTS: [&str; 4] = ["crawl", "multiple", "pages", "limit"];

/// Intent words that push a URL-bearing input toward link mapping
const LINK_HINTS: [&str; 3] = ["links", "map", "discover"];

/// Intent words for a plain web search
const SEARCH_HINTS: [&str; 2] = ["search", "find"];

/// Select the operation for a raw user input, or None if no operation is
/// identified and the caller should fall back to free-form completion.
pub fn select(catalog: &PatternCatalog, text: &str) -> Option<Operation> {
    let lowered = text.to_lowercase();

    for (operation, rules) in catalog.entries() {
        if rules.iter().any(|rule| rule.is_match(&lowered)) {
            return Some(operation);
        }
    }

    let contains_any = |hints: &[&str]| hints.iter().any(|hint| lowered.contains(hint));

    if contains_any(&URL_HINTS) {
        if contains_any(&CRAWL_HINTS) {
            return Some(Operation::CrawlWebsite);
        }
        if contains_any(&LINK_HINTS) {
            return Some(Operation::MapLinks);
        }
        return Some(Operation::ScrapeWebsite);
    }

    if contains_any(&SEARCH_HINTS) {
        return Some(Operation::SearchWebsite);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PatternCatalog {
        PatternCatalog::new().unwrap()
    }

    #[test]
    fn test_select_no_keywords_no_url() {
        let catalog = catalog();
        assert_eq!(select(&catalog, "hello there"), None);
        assert_eq!(select(&catalog, "what is the weather today"), None);
        assert_eq!(select(&catalog, ""), None);
    }

    #[test]
    fn test_select_bare_url_is_scrape() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "https://example.com/docs"),
            Some(Operation::ScrapeWebsite)
        );
        assert_eq!(
            select(&catalog, "summarize www.example.org please"),
            Some(Operation::ScrapeWebsite)
        );
    }

    #[test]
    fn test_select_pattern_scrape() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "Scrape the website https://example.com"),
            Some(Operation::ScrapeWebsite)
        );
        assert_eq!(
            select(&catalog, "get content from https://example.com"),
            Some(Operation::ScrapeWebsite)
        );
    }

    #[test]
    fn test_select_crawl_with_limit_phrase() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "crawl https://example.com limit 15 pages"),
            Some(Operation::CrawlWebsite)
        );
    }

    #[test]
    fn test_select_url_with_crawl_hints() {
        let catalog = catalog();
        // No pattern rule fires, but the URL + "pages" heuristic does
        assert_eq!(
            select(&catalog, "I need 5 pages from https://example.com"),
            Some(Operation::CrawlWebsite)
        );
    }

    #[test]
    fn test_select_url_with_link_hints() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "discover links on https://example.com"),
            Some(Operation::MapLinks)
        );
        assert_eq!(
            select(&catalog, "map links about pricing on https://site.io limit 30"),
            Some(Operation::MapLinks)
        );
    }

    #[test]
    fn test_select_search_keywords() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "search for rust async runtimes limit 5"),
            Some(Operation::SearchWebsite)
        );
        assert_eq!(
            select(&catalog, "find websites about embedded rust"),
            Some(Operation::SearchWebsite)
        );
    }

    #[test]
    fn test_select_deep_analysis() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "research on quantum computing depth 3 timeout 2 minutes"),
            Some(Operation::DeepAnalysis)
        );
        assert_eq!(
            select(&catalog, "run a comprehensive analysis of ai in education"),
            Some(Operation::DeepAnalysis)
        );
    }

    #[test]
    fn test_select_extract_content() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "extract structured data from these pages"),
            Some(Operation::ExtractContent)
        );
    }

    #[test]
    fn test_select_case_insensitive() {
        let catalog = catalog();
        assert_eq!(
            select(&catalog, "CRAWL THE WEBSITE https://example.com"),
            Some(Operation::CrawlWebsite)
        );
    }

    #[test]
    fn test_select_priority_order_resolves_ambiguity() {
        let catalog = catalog();
        // Matches both scrape ("scrape the website") and crawl ("crawl ... limit ... 5")
        // rule sets; catalog order puts scrape first.
        assert_eq!(
            select(&catalog, "scrape the website then crawl with limit 5"),
            Some(Operation::ScrapeWebsite)
        );
    }

    #[test]
    fn test_select_idempotent() {
        let catalog = catalog();
        let text = "crawl https://example.com limit 15 pages";
        assert_eq!(select(&catalog, text), select(&catalog, text));
    }
}
