//! Search-result extraction from HTML
//!
//! Result pages are undocumented and change without notice, so extraction is a
//! cascade of increasingly generic strategies:
//! - Semantic: result cards matched by a whitelist of structural selectors
//! - Link heuristic: anchors whose target looks like a result link
//! - Text block: a few mid-sized text blocks, proof the page loaded at all
//!
//! The first strategy producing any candidate wins; a failing strategy is
//! recorded and skipped. Extraction itself never fails.

mod links;
mod semantic;
mod text;
mod types;

pub use types::*;

use scraper::Html;
use url::Url;

use super::profile::SourceProfile;
use crate::types::RawCandidate;

/// Result extractor for one source
pub struct ResultExtractor {
    pub(crate) profile: &'static SourceProfile,
    /// Base for resolving relative result links
    pub(crate) link_base: Url,
    pub(crate) config: ExtractorConfig,
}

impl ResultExtractor {
    /// Create an extractor resolving relative links against `link_base`
    pub fn new(profile: &'static SourceProfile, link_base: Url, config: ExtractorConfig) -> Self {
        Self {
            profile,
            link_base,
            config,
        }
    }

    /// Extractor with default limits and the source's built-in landing page as link base
    pub fn for_profile(profile: &'static SourceProfile) -> Result<Self, url::ParseError> {
        let link_base = Url::parse(profile.root_url)?;
        Ok(Self::new(profile, link_base, ExtractorConfig::default()))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run the strategy cascade over a page
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        let source = self.profile.source;
        let mut extraction = Extraction::default();

        for strategy in Strategy::CASCADE {
            extraction.attempted.push(strategy);
            let result = match strategy {
                Strategy::Semantic => self.extract_semantic(&document),
                Strategy::LinkHeuristic => self.extract_links(&document),
                Strategy::TextBlock => self.extract_text_blocks(&document),
            };

            match result {
                Ok(mut candidates) => {
                    candidates.retain(RawCandidate::is_usable);
                    candidates.truncate(self.config.max_candidates);
                    tracing::debug!(%source, %strategy, count = candidates.len(), "Strategy finished");
                    if !candidates.is_empty() {
                        extraction.strategy = Some(strategy);
                        extraction.candidates = candidates;
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(%source, %strategy, "Extraction strategy failed: {}", e);
                    extraction.errors.push(format!("{}: {}", strategy, e));
                }
            }
        }

        if extraction.candidates.is_empty() {
            tracing::info!(%source, bytes = html.len(), "No candidates extracted from page");
        }

        extraction
    }

    fn result_selectors(&self) -> Vec<&str> {
        if self.config.result_selectors.is_empty() {
            self.profile.result_selectors.to_vec()
        } else {
            self.config.result_selectors.iter().map(String::as_str).collect()
        }
    }

    /// Resolve a raw href against the source; script links are dropped
    fn absolutize(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with("javascript:") {
            return None;
        }
        match self.link_base.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(_) => Some(href.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateKind, Source};
    use crate::util::char_len;

    fn bilibili_cards(count: usize) -> String {
        let cards: String = (0..count)
            .map(|i| {
                format!(
                    r#"<div class="video-card">
                        <a href="//www.bilibili.com/video/BV1aa411c7m{i}"><span class="duration">12:34</span></a>
                        <h3 class="video-title"><a href="//www.bilibili.com/video/BV1aa411c7m{i}">Rust 入门教程 第{i}集</a></h3>
                        <p class="video-desc">从零开始学习 Rust 编程语言的所有权与借用系统</p>
                        <span class="up-name">Alice</span>
                        <span class="play-count">1000 views</span>
                    </div>"#
                )
            })
            .collect();
        format!(
            r#"<html><body><div class="video-list">{cards}</div>
               <a href="https://www.bilibili.com/video/BV1zz411c7zz">Another linked video title</a>
               <p>{}</p></body></html>"#,
            "填充文本".repeat(20)
        )
    }

    fn extractor(source: Source) -> ResultExtractor {
        ResultExtractor::for_profile(source.profile()).unwrap()
    }

    #[test]
    fn test_semantic_cards_stop_cascade() {
        let extraction = extractor(Source::Bilibili).extract(&bilibili_cards(3));

        assert_eq!(extraction.strategy, Some(Strategy::Semantic));
        assert_eq!(extraction.attempted, vec![Strategy::Semantic]);
        assert_eq!(extraction.candidates.len(), 3);

        let first = &extraction.candidates[0];
        assert_eq!(first.kind, CandidateKind::Structured);
        assert_eq!(first.title.as_deref(), Some("Rust 入门教程 第0集"));
        assert_eq!(first.url.as_deref(), Some("https://www.bilibili.com/video/BV1aa411c7m0"));
        assert_eq!(first.summary.as_deref(), Some("从零开始学习 Rust 编程语言的所有权与借用系统"));
        assert_eq!(first.author.as_deref(), Some("Alice"));
        assert_eq!(first.stats.as_deref(), Some("1000 views"));
    }

    #[test]
    fn test_semantic_caps_at_max_candidates() {
        let extraction = extractor(Source::Bilibili).extract(&bilibili_cards(12));
        assert_eq!(extraction.strategy, Some(Strategy::Semantic));
        assert_eq!(extraction.candidates.len(), 10);
    }

    #[test]
    fn test_baidu_card_with_origin() {
        let html = r#"
            <div id="content_left">
              <div class="result c-container" id="1">
                <h3 class="c-title t"><a href="http://www.baidu.com/link?url=abc123xyz456">Rust 程序设计语言</a></h3>
                <div class="c-abstract">Rust 是一门赋予每个人构建可靠且高效软件能力的语言。</div>
                <div class="c-showurl">www.rust-lang.org</div>
              </div>
            </div>
        "#;
        let extraction = extractor(Source::Baidu).extract(html);

        assert_eq!(extraction.strategy, Some(Strategy::Semantic));
        let candidate = &extraction.candidates[0];
        assert_eq!(candidate.title.as_deref(), Some("Rust 程序设计语言"));
        assert_eq!(candidate.url.as_deref(), Some("http://www.baidu.com/link?url=abc123xyz456"));
        assert_eq!(
            candidate.summary.as_deref(),
            Some("Rust 是一门赋予每个人构建可靠且高效软件能力的语言。")
        );
        assert_eq!(candidate.origin.as_deref(), Some("www.rust-lang.org"));
        assert_eq!(candidate.author, None);
    }

    #[test]
    fn test_link_heuristic_fallback_dedupes_titles() {
        let html = r#"
            <html><body>
              <div><a href="/link?url=AAAAAAAAAAAAAAAAAAAA">Rust Programming Language</a></div>
              <div>A language empowering everyone to build reliable software.</div>
              <div><a href="/link?url=BBBBBBBBBBBBBBBBBBBB">rust programming language</a></div>
              <div><a href="/link?url=CCCCCCCCCCCCCCCCCCCC">The Rust Book online</a></div>
              <a href="javascript:void(0)">Not a result at all here</a>
              <a href="/s?wd=x">Short href link text</a>
            </body></html>
        "#;
        let extraction = extractor(Source::Baidu).extract(html);

        assert_eq!(extraction.strategy, Some(Strategy::LinkHeuristic));
        assert_eq!(extraction.attempted, vec![Strategy::Semantic, Strategy::LinkHeuristic]);
        assert_eq!(extraction.candidates.len(), 2);

        let first = &extraction.candidates[0];
        assert_eq!(first.title.as_deref(), Some("Rust Programming Language"));
        assert_eq!(
            first.url.as_deref(),
            Some("https://www.baidu.com/link?url=AAAAAAAAAAAAAAAAAAAA")
        );
        assert_eq!(
            first.summary.as_deref(),
            Some("A language empowering everyone to build reliable software.")
        );
        assert_eq!(extraction.candidates[1].title.as_deref(), Some("The Rust Book online"));
    }

    #[test]
    fn test_text_block_fallback() {
        let long = "长".repeat(260);
        let html = format!(
            r#"<html><body>
                <p>too short</p>
                <p>{long}</p>
                <p>{}</p>
                <p>{}</p>
                <p>{}</p>
            </body></html>"#,
            "a".repeat(60),
            "b".repeat(70),
            "c".repeat(80),
        );
        let extraction = extractor(Source::Bilibili).extract(&html);

        assert_eq!(extraction.strategy, Some(Strategy::TextBlock));
        assert_eq!(extraction.attempted, Strategy::CASCADE.to_vec());
        assert_eq!(extraction.candidates.len(), 3);
        assert!(extraction.candidates.iter().all(|c| c.is_text_fallback() && c.title.is_none()));

        let truncated = extraction.candidates[0].content.as_deref().unwrap();
        assert_eq!(truncated, format!("{}...", "长".repeat(197)));
        assert_eq!(char_len(truncated), 200);
        assert_eq!(extraction.candidates[1].content.as_deref(), Some("a".repeat(60).as_str()));
    }

    #[test]
    fn test_length_windows_at_boundaries() {
        let config = ExtractorConfig::default();
        assert!(!config.title_fits(4) && config.title_fits(5));
        assert!(config.title_fits(200) && !config.title_fits(201));
        assert!(!config.summary_fits(19) && config.summary_fits(20));
        assert!(config.summary_fits(300) && !config.summary_fits(301));
        assert!(!config.block_fits(49) && config.block_fits(50));
        assert!(config.block_fits(499) && !config.block_fits(500));
    }

    #[test]
    fn test_link_titles_bounded_inclusively() {
        let links: String = [("a", 4), ("b", 5), ("c", 200), ("d", 201)]
            .iter()
            .enumerate()
            .map(|(i, (ch, len))| {
                format!(
                    r#"<div><a href="/link?url=AAAAAAAAAAAAAAAAAAAA{i}">{}</a></div>"#,
                    ch.repeat(*len)
                )
            })
            .collect();
        let html = format!("<html><body>{links}</body></html>");
        let extraction = extractor(Source::Baidu).extract(&html);

        assert_eq!(extraction.strategy, Some(Strategy::LinkHeuristic));
        let titles: Vec<usize> = extraction
            .candidates
            .iter()
            .map(|c| char_len(c.title.as_deref().unwrap()))
            .collect();
        assert_eq!(titles, vec![5, 200]);
    }

    #[test]
    fn test_link_summaries_bounded_inclusively() {
        let section = |i: usize, first: String, second: String| {
            format!(
                r#"<section><div><a href="/link?url=BBBBBBBBBBBBBBBBBBBB{i}">Boundary result {i}</a></div>
                   <div>{first}</div><div>{second}</div></section>"#
            )
        };
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            section(0, "x".repeat(19), "y".repeat(20)),
            section(1, "z".repeat(301), "w".repeat(300)),
            section(2, "x".repeat(19), "z".repeat(301)),
        );
        let extraction = extractor(Source::Baidu).extract(&html);

        assert_eq!(extraction.strategy, Some(Strategy::LinkHeuristic));
        assert_eq!(extraction.candidates.len(), 3);
        assert_eq!(extraction.candidates[0].summary, Some("y".repeat(20)));
        assert_eq!(extraction.candidates[1].summary, Some("w".repeat(300)));
        assert_eq!(extraction.candidates[2].summary, None);
    }

    #[test]
    fn test_text_blocks_bounded_half_open() {
        let html = format!(
            "<html><body><p>{}</p><p>{}</p><p>{}</p><p>{}</p></body></html>",
            "a".repeat(49),
            "b".repeat(50),
            "c".repeat(499),
            "d".repeat(500),
        );
        let extraction = extractor(Source::Bilibili).extract(&html);

        assert_eq!(extraction.strategy, Some(Strategy::TextBlock));
        assert_eq!(extraction.candidates.len(), 2);
        assert_eq!(extraction.candidates[0].content, Some("b".repeat(50)));
        assert_eq!(
            extraction.candidates[1].content,
            Some(format!("{}...", "c".repeat(197)))
        );
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let extraction = extractor(Source::Baidu).extract("<html><body></body></html>");
        assert!(extraction.candidates.is_empty());
        assert_eq!(extraction.strategy, None);
        assert_eq!(extraction.attempted.len(), 3);
        assert!(extraction.errors.is_empty());
    }

    #[test]
    fn test_invalid_selector_falls_through() {
        let config = ExtractorConfig {
            result_selectors: vec!["div[[[".to_string()],
            ..Default::default()
        };
        let profile = Source::Bilibili.profile();
        let extractor = ResultExtractor::new(profile, Url::parse(profile.root_url).unwrap(), config);

        let extraction = extractor.extract(&bilibili_cards(2));
        assert_eq!(extraction.errors.len(), 1);
        assert!(extraction.errors[0].starts_with("semantic"));
        assert_eq!(extraction.strategy, Some(Strategy::LinkHeuristic));
        assert!(!extraction.candidates.is_empty());
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let extraction = extractor(Source::Bilibili).extract("<div class=\"video-card\"><a href='//www.bilibili.com/video/BV1'>unterminated");
        assert!(extraction.candidates.len() <= 10);
    }
}
