//! Semantic-selector strategy: structured parsing of result cards

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use super::text::{descendant_elements, element_text, find_hinted_text, has_class_hint, parse_selector};
use super::{ExtractError, ResultExtractor};
use crate::types::RawCandidate;
use crate::util::char_len;

const TITLE_TAGS: &[&str] = &["h3", "h2", "a"];
const TEXT_TAGS: &[&str] = &["p", "div", "span"];
const META_TAGS: &[&str] = &["span", "div"];

impl ResultExtractor {
    /// Parse every container matched by the result-card whitelist
    pub(super) fn extract_semantic(&self, document: &Html) -> Result<Vec<RawCandidate>, ExtractError> {
        let group = self.result_selectors().join(", ");
        let cards = parse_selector(&group)?;
        let anchors = parse_selector("a[href]")?;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for card in document.select(&cards) {
            if candidates.len() >= self.config.max_candidates {
                break;
            }
            let Some(candidate) = self.parse_card(card, &anchors) else {
                continue;
            };
            let key = candidate.title.as_deref().unwrap_or_default().to_lowercase();
            if seen.insert(key) {
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }

    fn parse_card(&self, card: ElementRef<'_>, anchors: &Selector) -> Option<RawCandidate> {
        let (title, url) = self.card_title(card, anchors)?;
        let summary = self.card_summary(card, &title);

        let mut candidate = RawCandidate::structured(title);
        candidate.url = url;
        candidate.summary = summary;
        self.attach_metadata(&mut candidate, card);
        Some(candidate)
    }

    /// Title text and absolutized link of a card.
    ///
    /// Prefers a heading/anchor tagged with a title hint, then an anchor
    /// pointing at a result URL, then any anchor of acceptable length.
    fn card_title(&self, card: ElementRef<'_>, anchors: &Selector) -> Option<(String, Option<String>)> {
        let hinted = descendant_elements(card)
            .filter(|el| TITLE_TAGS.contains(&el.value().name()))
            .filter(|el| has_class_hint(*el, self.profile.title_hints))
            .map(|el| (el, element_text(el)))
            .find(|(_, text)| self.config.title_fits(char_len(text)));

        if let Some((el, text)) = hinted {
            let href = if el.value().name() == "a" {
                el.value().attr("href")
            } else {
                el.select(anchors).next().and_then(|a| a.value().attr("href"))
            };
            let href = href.or_else(|| card.select(anchors).next().and_then(|a| a.value().attr("href")));
            return Some((text, href.and_then(|h| self.absolutize(h))));
        }

        let fitting: Vec<(ElementRef<'_>, String)> = card
            .select(anchors)
            .map(|a| (a, element_text(a)))
            .filter(|(_, text)| self.config.title_fits(char_len(text)))
            .collect();

        let chosen = fitting
            .iter()
            .find(|(a, _)| a.value().attr("href").is_some_and(|h| (self.profile.is_content_url)(h.trim())))
            .or_else(|| fitting.first())?;

        let (anchor, text) = chosen;
        let url = anchor.value().attr("href").and_then(|h| self.absolutize(h));
        Some((text.clone(), url))
    }

    fn card_summary(&self, card: ElementRef<'_>, title: &str) -> Option<String> {
        find_hinted_text(card, TEXT_TAGS, self.profile.summary_hints).or_else(|| {
            descendant_elements(card)
                .filter(|el| TEXT_TAGS.contains(&el.value().name()))
                .map(element_text)
                .find(|text| self.config.summary_fits(char_len(text)) && !text.contains(title))
        })
    }

    /// Fill author, stats and origin from hinted elements under `root`
    pub(super) fn attach_metadata(&self, candidate: &mut RawCandidate, root: ElementRef<'_>) {
        candidate.author = find_hinted_text(root, META_TAGS, self.profile.author_hints);

        if !self.profile.stats_hints.is_empty() {
            let stats: Vec<String> = descendant_elements(root)
                .filter(|el| META_TAGS.contains(&el.value().name()))
                .filter(|el| has_class_hint(*el, self.profile.stats_hints))
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();
            if !stats.is_empty() {
                candidate.stats = Some(stats.join(" "));
            }
        }

        candidate.origin = find_hinted_text(root, &[], self.profile.origin_hints);
    }
}
