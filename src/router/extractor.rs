//! Parameter extraction from free text
//!
//! Given a selected operation, pulls its typed arguments out of the raw input
//! with targeted regexes and fills documented defaults. Extraction never
//! fails: a missing or malformed value simply leaves the argument unset and
//! the validator decides what happens next. This is regex-only heuristics,
//! not language understanding, so the precision ceiling is known and low.

use regex::Regex;

use crate::error::{Result, RoutrError};

use super::operation::{ArgumentSet, Operation};

/// Default page limit for crawl requests
const DEFAULT_CRAWL_LIMIT: u64 = 10;

/// Default result limit for search requests
const DEFAULT_SEARCH_LIMIT: u64 = 10;

/// Default link limit for map requests
const DEFAULT_MAP_LIMIT: u64 = 20;

/// Phrases that flag a main-content-only scrape
const MAIN_CONTENT_HINTS: [&str; 3] = ["main content", "only content", "no navigation"];

/// Command phrases stripped from a search query, longest first
const SEARCH_COMMAND_PHRASES: [&str; 4] = ["search for", "find", "look for", "search"];

/// Indicator words that start an extraction prompt, tried in this order
const PROMPT_INDICATORS: [&str; 4] = ["extract", "get", "find", "pull out"];

/// Indicator words that precede a research query, tried in this order
const QUERY_INDICATORS: [&str; 4] = ["research", "analyze", "analysis of", "study"];

/// Extractor with all capture regexes compiled once at startup
#[derive(Debug)]
pub struct Extractor {
    url: Regex,
    limit_phrase: Regex,
    limit_strip: Regex,
    limit_standalone: Regex,
    about_filter: Regex,
    depth: Regex,
    time_limit: Regex,
    search_commands: Vec<Regex>,
    prompt_indicators: Vec<Regex>,
    query_indicators: Vec<Regex>,
}

impl Extractor {
    /// Compile the capture regexes
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| RoutrError::Catalog(format!("Invalid capture pattern '{}': {}", pattern, e)))
        };

        let compile_all = |phrases: &[&str], template: fn(&str) -> String| {
            phrases
                .iter()
                .map(|p| compile(&template(p)))
                .collect::<Result<Vec<Regex>>>()
        };

        Ok(Self {
            url: compile(r#"https?://[^\s<>"{}|\\^`\[\]]+"#)?,
            limit_phrase: compile(r"(?:limit|max|maximum|up to)\s*(\d+)")?,
            limit_strip: compile(r"(?i)\b(?:limit|max|maximum|up to)\s*\d+")?,
            limit_standalone: compile(r"\b(\d+)\s*(?:pages?|links?|results?)")?,
            about_filter: compile(r"about\s+([^,.\n]+)")?,
            depth: compile(r"(?:depth|levels?)\s*(\d+)")?,
            time_limit: compile(r"(?:time|timeout|limit)\s*(\d+)\s*(seconds?|minutes?)")?,
            search_commands: compile_all(&SEARCH_COMMAND_PHRASES, |p| format!(r"(?i)\b{}\b", p))?,
            prompt_indicators: compile_all(&PROMPT_INDICATORS, |p| format!(r"(?i){}", p))?,
            query_indicators: compile_all(&QUERY_INDICATORS, |p| format!(r"(?i){}", p))?,
        })
    }

    /// Extract the argument set for a selected operation
    ///
    /// URLs are captured from the original text to preserve case; everything
    /// keyword-driven works on a lower-cased copy.
    pub fn extract(&self, text: &str, operation: Operation) -> ArgumentSet {
        let lowered = text.to_lowercase();
        let mut args = ArgumentSet::new();

        match operation {
            Operation::ScrapeWebsite => self.extract_scrape(text, &lowered, &mut args),
            Operation::CrawlWebsite => self.extract_crawl(text, &lowered, &mut args),
            Operation::SearchWebsite => self.extract_search(text, &lowered, &mut args),
            Operation::MapLinks => self.extract_map(text, &lowered, &mut args),
            Operation::ExtractContent => self.extract_content(text, &mut args),
            Operation::DeepAnalysis => self.extract_deep_analysis(text, &lowered, &mut args),
        }

        args
    }

    fn extract_scrape(&self, text: &str, lowered: &str, args: &mut ArgumentSet) {
        if let Some(url) = self.first_url(text) {
            args.set("url", url);
        }

        // First format keyword wins; "markdown" also covers the "md" shorthand
        if lowered.contains("html") {
            args.set("formats", vec!["html".to_string()]);
        } else if lowered.contains("json") {
            args.set("formats", vec!["json".to_string()]);
        } else if lowered.contains("markdown") || lowered.contains("md") {
            args.set("formats", vec!["markdown".to_string()]);
        }

        if MAIN_CONTENT_HINTS.iter().any(|hint| lowered.contains(hint)) {
            args.set("onlyMainContent", true);
        }
    }

    fn extract_crawl(&self, text: &str, lowered: &str, args: &mut ArgumentSet) {
        if let Some(url) = self.first_url(text) {
            args.set("url", url);
        }
        if let Some(limit) = self.capture_limit(lowered, Some(DEFAULT_CRAWL_LIMIT)) {
            args.set("limit", limit);
        }
    }

    fn extract_search(&self, text: &str, lowered: &str, args: &mut ArgumentSet) {
        let mut query = text.to_string();
        for command in &self.search_commands {
            query = command.replace_all(&query, "").into_owned();
        }
        // The limit phrase is an instruction to us, not part of the query
        query = self.limit_strip.replace_all(&query, "").into_owned();
        let query = query.trim();
        if !query.is_empty() {
            args.set("query", query);
        }

        if let Some(limit) = self.capture_limit(lowered, Some(DEFAULT_SEARCH_LIMIT)) {
            args.set("limit", limit);
        }
    }

    fn extract_map(&self, text: &str, lowered: &str, args: &mut ArgumentSet) {
        if let Some(url) = self.first_url(text) {
            args.set("url", url);
        }

        // Filter term: the run after "about" up to the next comma/period/newline.
        // Absent filter stays empty and fails validation downstream.
        let filter = self
            .about_filter
            .captures(lowered)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        args.set("search", filter);

        if let Some(limit) = self.capture_limit(lowered, Some(DEFAULT_MAP_LIMIT)) {
            args.set("limit", limit);
        }
    }

    fn extract_content(&self, text: &str, args: &mut ArgumentSet) {
        let urls: Vec<String> = self.url.find_iter(text).map(|m| m.as_str().to_string()).collect();
        args.set("urls", urls);

        let prompt = self
            .prompt_indicators
            .iter()
            .find_map(|indicator| indicator.find(text))
            .map(|m| &text[m.start()..])
            .unwrap_or(text);
        args.set("prompt", prompt);
    }

    fn extract_deep_analysis(&self, text: &str, lowered: &str, args: &mut ArgumentSet) {
        let query = self
            .query_indicators
            .iter()
            .find_map(|indicator| indicator.find(text))
            .map(|m| text[m.end()..].trim())
            .unwrap_or(text);
        if !query.is_empty() {
            args.set("query", query);
        }

        if let Some(depth) = self.depth.captures(lowered).and_then(|c| parse_capture(&c, 1)) {
            args.set("max_depth", depth);
        }

        if let Some(caps) = self.time_limit.captures(lowered) {
            if let Some(mut seconds) = parse_capture(&caps, 1) {
                let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                if unit.starts_with("minute") {
                    seconds *= 60;
                }
                args.set("time_limit", seconds);
            }
        }
    }

    /// First well-formed URL in the original-case text
    fn first_url(&self, text: &str) -> Option<String> {
        self.url.find(text).map(|m| m.as_str().to_string())
    }

    /// Two-stage numeric limit capture with an optional documented default
    ///
    /// Tries the explicit limit phrase first, then a standalone count like
    /// "15 pages". A match that overflows u64 is treated as absent.
    fn capture_limit(&self, lowered: &str, default: Option<u64>) -> Option<u64> {
        self.limit_phrase
            .captures(lowered)
            .and_then(|c| parse_capture(&c, 1))
            .or_else(|| {
                self.limit_standalone
                    .captures(lowered)
                    .and_then(|c| parse_capture(&c, 1))
            })
            .or(default)
    }
}

fn parse_capture(caps: &regex::Captures<'_>, group: usize) -> Option<u64> {
    caps.get(group)?.as_str().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::operation::ArgValue;

    fn extractor() -> Extractor {
        Extractor::new().unwrap()
    }

    fn get_str<'a>(args: &'a ArgumentSet, name: &str) -> Option<&'a str> {
        args.get(name).and_then(ArgValue::as_str)
    }

    fn get_int(args: &ArgumentSet, name: &str) -> Option<u64> {
        args.get(name).and_then(ArgValue::as_int)
    }

    #[test]
    fn test_scrape_url_capture() {
        let args = extractor().extract(
            "Scrape the website https://Example.com/Docs please",
            Operation::ScrapeWebsite,
        );
        // URL keeps original case
        assert_eq!(get_str(&args, "url"), Some("https://Example.com/Docs"));
    }

    #[test]
    fn test_scrape_missing_url_leaves_arg_unset() {
        let args = extractor().extract("scrape the website", Operation::ScrapeWebsite);
        assert!(args.get("url").is_none());
    }

    #[test]
    fn test_scrape_format_html() {
        let args = extractor().extract(
            "scrape the page https://example.com as html",
            Operation::ScrapeWebsite,
        );
        assert_eq!(args.get("formats").and_then(ArgValue::as_list), Some(&["html".to_string()][..]));
    }

    #[test]
    fn test_scrape_format_markdown() {
        let args = extractor().extract(
            "scrape the page https://example.io in markdown",
            Operation::ScrapeWebsite,
        );
        assert_eq!(
            args.get("formats").and_then(ArgValue::as_list),
            Some(&["markdown".to_string()][..])
        );
    }

    #[test]
    fn test_scrape_no_format_keyword() {
        let args = extractor().extract(
            "scrape the page https://example.io",
            Operation::ScrapeWebsite,
        );
        assert!(args.get("formats").is_none());
    }

    #[test]
    fn test_scrape_main_content_flag() {
        let args = extractor().extract(
            "scrape the page https://example.io, main content only",
            Operation::ScrapeWebsite,
        );
        assert_eq!(args.get("onlyMainContent"), Some(&ArgValue::Bool(true)));
    }

    #[test]
    fn test_crawl_limit_phrase() {
        let args = extractor().extract(
            "crawl https://example.com limit 15 pages",
            Operation::CrawlWebsite,
        );
        assert_eq!(get_str(&args, "url"), Some("https://example.com"));
        assert_eq!(get_int(&args, "limit"), Some(15));
    }

    #[test]
    fn test_crawl_standalone_count() {
        let args = extractor().extract(
            "crawl the website https://example.com for 25 pages",
            Operation::CrawlWebsite,
        );
        assert_eq!(get_int(&args, "limit"), Some(25));
    }

    #[test]
    fn test_crawl_default_limit() {
        let args = extractor().extract(
            "crawl the website https://example.com",
            Operation::CrawlWebsite,
        );
        assert_eq!(get_int(&args, "limit"), Some(10));
    }

    #[test]
    fn test_crawl_overlong_number_falls_back_to_default() {
        let args = extractor().extract(
            "crawl https://example.com limit 99999999999999999999999999",
            Operation::CrawlWebsite,
        );
        assert_eq!(get_int(&args, "limit"), Some(10));
    }

    #[test]
    fn test_search_query_strips_command_and_limit() {
        let args = extractor().extract(
            "search for rust async runtimes limit 5",
            Operation::SearchWebsite,
        );
        assert_eq!(get_str(&args, "query"), Some("rust async runtimes"));
        assert_eq!(get_int(&args, "limit"), Some(5));
    }

    #[test]
    fn test_search_default_limit() {
        let args = extractor().extract("search for embedded rust", Operation::SearchWebsite);
        assert_eq!(get_str(&args, "query"), Some("embedded rust"));
        assert_eq!(get_int(&args, "limit"), Some(10));
    }

    #[test]
    fn test_search_empty_query_left_unset() {
        // Nothing remains once the command phrase is stripped
        let args = extractor().extract("search", Operation::SearchWebsite);
        assert!(args.get("query").is_none());
        assert_eq!(get_int(&args, "limit"), Some(10));
    }

    #[test]
    fn test_search_command_word_boundary() {
        // "findings" must not lose its prefix to the "find" command word
        let args = extractor().extract("search for findings on rust", Operation::SearchWebsite);
        assert_eq!(get_str(&args, "query"), Some("findings on rust"));
    }

    #[test]
    fn test_map_links_filter_and_limit() {
        let args = extractor().extract(
            "map links about pricing on https://site.io limit 30",
            Operation::MapLinks,
        );
        assert_eq!(get_str(&args, "url"), Some("https://site.io"));
        // Captured up to the next period, so the URL prefix rides along
        assert_eq!(get_str(&args, "search"), Some("pricing on https://site"));
        assert_eq!(get_int(&args, "limit"), Some(30));
    }

    #[test]
    fn test_map_links_filter_stops_at_comma() {
        let args = extractor().extract(
            "map links about pricing, on https://site.io",
            Operation::MapLinks,
        );
        assert_eq!(get_str(&args, "search"), Some("pricing"));
    }

    #[test]
    fn test_map_links_no_filter_is_empty() {
        let args = extractor().extract("map links on https://site.io", Operation::MapLinks);
        assert_eq!(get_str(&args, "search"), Some(""));
        assert_eq!(get_int(&args, "limit"), Some(20));
    }

    #[test]
    fn test_extract_content_urls_and_prompt() {
        let args = extractor().extract(
            "From https://a.com and https://b.com extract the product names",
            Operation::ExtractContent,
        );
        let urls = args.get("urls").and_then(ArgValue::as_list).unwrap();
        assert_eq!(urls, &["https://a.com", "https://b.com"]);
        assert_eq!(get_str(&args, "prompt"), Some("extract the product names"));
    }

    #[test]
    fn test_extract_content_indicator_order() {
        // "extract" is tried before "get", even when "get" appears first
        let args = extractor().extract(
            "get ready to extract all prices from https://shop.example",
            Operation::ExtractContent,
        );
        assert_eq!(
            get_str(&args, "prompt"),
            Some("extract all prices from https://shop.example")
        );
    }

    #[test]
    fn test_extract_content_no_indicator_uses_whole_input() {
        let args = extractor().extract("all the prices please", Operation::ExtractContent);
        assert_eq!(get_str(&args, "prompt"), Some("all the prices please"));
        assert!(args.get("urls").and_then(ArgValue::as_list).unwrap().is_empty());
    }

    #[test]
    fn test_deep_analysis_query_depth_and_minutes() {
        let args = extractor().extract(
            "research on quantum computing depth 3 timeout 2 minutes",
            Operation::DeepAnalysis,
        );
        assert_eq!(
            get_str(&args, "query"),
            Some("on quantum computing depth 3 timeout 2 minutes")
        );
        assert_eq!(get_int(&args, "max_depth"), Some(3));
        // Minutes converted to seconds
        assert_eq!(get_int(&args, "time_limit"), Some(120));
    }

    #[test]
    fn test_deep_analysis_seconds_unit() {
        let args = extractor().extract(
            "research on llm agents timeout 90 seconds",
            Operation::DeepAnalysis,
        );
        assert_eq!(get_int(&args, "time_limit"), Some(90));
    }

    #[test]
    fn test_deep_analysis_no_overrides() {
        let args = extractor().extract("research on llm agents", Operation::DeepAnalysis);
        assert_eq!(get_str(&args, "query"), Some("on llm agents"));
        assert!(args.get("max_depth").is_none());
        assert!(args.get("time_limit").is_none());
    }

    #[test]
    fn test_deep_analysis_no_indicator_uses_whole_input() {
        let args = extractor().extract("quantum computing trends", Operation::DeepAnalysis);
        assert_eq!(get_str(&args, "query"), Some("quantum computing trends"));
    }

    #[test]
    fn test_extract_idempotent() {
        let ex = extractor();
        let text = "crawl https://example.com limit 15 pages";
        let first = ex.extract(text, Operation::CrawlWebsite);
        let second = ex.extract(text, Operation::CrawlWebsite);
        assert_eq!(first, second);
    }
}
