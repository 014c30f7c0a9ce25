//! Link-heuristic strategy: result links recognized by their target URL

use scraper::{ElementRef, Html};
use std::collections::HashSet;

use super::text::{element_text, parse_selector};
use super::{ExtractError, ResultExtractor};
use crate::types::RawCandidate;
use crate::util::char_len;

impl ResultExtractor {
    /// Scan all anchors for result-looking links, deduplicated by title
    pub(super) fn extract_links(&self, document: &Html) -> Result<Vec<RawCandidate>, ExtractError> {
        let anchors = parse_selector("a[href]")?;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for anchor in document.select(&anchors) {
            if candidates.len() >= self.config.max_candidates {
                break;
            }
            let href = anchor.value().attr("href").unwrap_or_default().trim();
            if !(self.profile.is_content_url)(href) {
                continue;
            }
            let title = element_text(anchor);
            if !self.config.title_fits(char_len(&title)) {
                continue;
            }
            if !seen.insert(title.to_lowercase()) {
                continue;
            }

            let mut candidate = RawCandidate::structured(title);
            candidate.url = self.absolutize(href);
            if let Some(parent) = anchor.parent().and_then(ElementRef::wrap) {
                candidate.summary = self.sibling_summary(parent);
                self.attach_metadata(&mut candidate, parent);
            }
            candidates.push(candidate);
        }

        Ok(candidates)
    }

    /// First following sibling of `element` with summary-sized text
    fn sibling_summary(&self, element: ElementRef<'_>) -> Option<String> {
        element
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .map(element_text)
            .find(|text| self.config.summary_fits(char_len(text)))
    }
}
