//! Element text helpers and the text-block fallback

use scraper::{ElementRef, Html, Selector};

use super::{ExtractError, ResultExtractor};
use crate::types::RawCandidate;
use crate::util::{char_len, collapse_whitespace, truncate_chars};

/// Compile a selector, reporting failures as a strategy error
pub(super) fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Whitespace-collapsed text of an element and all its descendants
pub(super) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Whether any class of the element contains one of the hint substrings
pub(super) fn has_class_hint(element: ElementRef<'_>, hints: &[&str]) -> bool {
    !hints.is_empty()
        && element
            .value()
            .classes()
            .any(|class| hints.iter().any(|hint| class.contains(hint)))
}

/// Descendant elements of `root`, excluding `root` itself, in document order
pub(super) fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First descendant with one of `tags` carrying a class hint and non-empty text
pub(super) fn find_hinted_text(root: ElementRef<'_>, tags: &[&str], hints: &[&str]) -> Option<String> {
    if hints.is_empty() {
        return None;
    }
    descendant_elements(root)
        .filter(|el| tags.is_empty() || tags.contains(&el.value().name()))
        .filter(|el| has_class_hint(*el, hints))
        .map(element_text)
        .find(|text| !text.is_empty())
}

impl ResultExtractor {
    /// Last-resort strategy: the first few mid-sized text blocks, truncated
    pub(super) fn extract_text_blocks(&self, document: &Html) -> Result<Vec<RawCandidate>, ExtractError> {
        let blocks = parse_selector("p, div, span")?;
        let limit = self.config.fallback_blocks.min(self.config.max_candidates);

        let candidates = document
            .select(&blocks)
            .map(element_text)
            .filter(|text| self.config.block_fits(char_len(text)))
            .take(limit)
            .map(|text| RawCandidate::text_fallback(truncate_chars(&text, self.config.fallback_chars)))
            .collect();

        Ok(candidates)
    }
}
