//! Search orchestration
//!
//! A search fans out to one pipeline per source (fetch, block check,
//! extraction), waits for every pipeline under a shared deadline, then
//! filters, normalizes and merges whatever succeeded. A failing source
//! never fails the search unless every source fails.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use super::diagnostics::{DiagnosticEvent, DiagnosticsSink, EventKind, TracingSink};
use super::merge::MergeDeduplicator;
use super::normalize::normalize;
use super::relevance::is_relevant;
use crate::config::{Config, SearchConfig};
use crate::scraping::{
    BlockDetector, CancelToken, Endpoints, Extraction, ExtractorConfig, PageFetcher,
    RequestSession, ResultExtractor, Strategy,
};
use crate::types::{MergedResultSet, NormalizedResult, QueryError, SearchRequest, Source};

/// Reason recorded for sources without a pipeline
const UNAVAILABLE: &str = "source unavailable";

// ============================================================================
// States and errors
// ============================================================================

/// Lifecycle of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    Fetching,
    Extracting,
    Merging,
    Done,
    AllSourcesFailed,
}

impl SearchState {
    /// Whether `next` directly follows `self`
    pub fn can_advance_to(self, next: SearchState) -> bool {
        use SearchState::*;
        matches!(
            (self, next),
            (Idle, Fetching)
                | (Fetching, Extracting)
                | (Fetching, AllSourcesFailed)
                | (Extracting, Merging)
                | (Merging, Done)
        )
    }
}

/// Lifecycle of one source pipeline within a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Fetching,
    Extracting,
    Done,
    Failed,
}

/// Why one source produced nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: Source,
    pub reason: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

fn join_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced to search callers
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),
    #[error("All sources failed: {}", join_failures(.failures))]
    AllSourcesFailed { failures: Vec<SourceFailure> },
}

// ============================================================================
// Reports
// ============================================================================

/// What happened to one source during a search
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: Source,
    pub state: PipelineState,
    /// Anti-bot markers were present in the page
    pub blocked: bool,
    /// The page carried the source's results-page signature
    pub result_marker: bool,
    pub strategy: Option<Strategy>,
    /// Candidates produced by the extractor
    pub raw_candidates: usize,
    /// Candidates that passed the relevance filter (before capping)
    pub relevant: usize,
    pub failure: Option<String>,
    pub elapsed: Duration,
}

impl SourceReport {
    fn new(source: Source) -> Self {
        Self {
            source,
            state: PipelineState::Idle,
            blocked: false,
            result_marker: false,
            strategy: None,
            raw_candidates: 0,
            relevant: 0,
            failure: None,
            elapsed: Duration::ZERO,
        }
    }

    fn fail(mut self, reason: impl Into<String>, elapsed: Duration) -> Self {
        self.state = PipelineState::Failed;
        self.failure = Some(reason.into());
        self.elapsed = elapsed;
        self
    }

    pub fn is_failed(&self) -> bool {
        self.state == PipelineState::Failed
    }
}

/// Full outcome of one search
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub search_id: Uuid,
    pub keyword: String,
    pub page: u32,
    pub state: SearchState,
    /// One entry per source, in merge order
    pub sources: Vec<SourceReport>,
    pub results: MergedResultSet,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn failures(&self) -> Vec<SourceFailure> {
        self.sources
            .iter()
            .filter(|r| r.is_failed())
            .map(|r| SourceFailure {
                source: r.source,
                reason: r.failure.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Merged results, or the per-source failures if nothing succeeded
    pub fn into_result(self) -> Result<MergedResultSet, SearchError> {
        match self.state {
            SearchState::AllSourcesFailed => Err(SearchError::AllSourcesFailed {
                failures: self.failures(),
            }),
            _ => Ok(self.results),
        }
    }
}

// ============================================================================
// Source pipeline
// ============================================================================

/// Fetch and extraction for a single source
pub struct SourcePipeline {
    source: Source,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ResultExtractor>,
    detector: BlockDetector,
    endpoints: Endpoints,
}

struct PipelineOutcome {
    report: SourceReport,
    extraction: Option<Extraction>,
}

impl PipelineOutcome {
    fn failed(report: SourceReport) -> Self {
        Self {
            report,
            extraction: None,
        }
    }
}

impl SourcePipeline {
    pub fn new(
        source: Source,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<ResultExtractor>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            source,
            fetcher,
            extractor,
            detector: BlockDetector::new(source.profile()),
            endpoints,
        }
    }

    /// Pipeline backed by a live [`RequestSession`]
    pub fn from_config(source: Source, config: &Config) -> anyhow::Result<Self> {
        let profile = source.profile();
        let source_config = config.sources.get(source);
        let endpoints = Endpoints::resolve(profile, source_config)?;

        let mut session_config = config.session.clone();
        // Distinct but reproducible streams per source
        session_config.rng_seed = session_config
            .rng_seed
            .map(|seed| seed.wrapping_add(source as u64));
        let session = RequestSession::new(profile, endpoints.clone(), session_config);

        let extractor_config = ExtractorConfig {
            max_candidates: config.search.max_candidates,
            result_selectors: source_config.result_selectors.clone(),
            ..Default::default()
        };
        let extractor = ResultExtractor::new(profile, endpoints.root.clone(), extractor_config);

        Ok(Self::new(
            source,
            Arc::new(session),
            Arc::new(extractor),
            endpoints,
        ))
    }

    pub fn source(&self) -> Source {
        self.source
    }

    async fn run(
        &self,
        request: &SearchRequest,
        cancel: &CancelToken,
        search_id: Uuid,
        sink: &dyn DiagnosticsSink,
    ) -> PipelineOutcome {
        let start = Instant::now();
        let source = self.source;
        let mut report = SourceReport::new(source);

        let query = request.query_for(source);
        let url = self.endpoints.search_url(source.profile(), &query);

        report.state = PipelineState::Fetching;
        tracing::debug!(%search_id, %source, %url, "Fetching search page");
        let page = match self.fetcher.fetch(&url, &self.endpoints.root, cancel).await {
            Ok(page) => page,
            Err(e) => return PipelineOutcome::failed(report.fail(e.to_string(), start.elapsed())),
        };

        report.blocked = self.detector.is_blocked(&page.body);
        report.result_marker = self.detector.has_result_marker(&page.body);
        sink.record(DiagnosticEvent::new(
            search_id,
            EventKind::FetchCompleted {
                source,
                status: page.status_code,
                bytes: page.body.len(),
                blocked: report.blocked,
                result_marker: report.result_marker,
            },
        ));

        report.state = PipelineState::Extracting;
        let extractor = Arc::clone(&self.extractor);
        let body = page.body;
        let extraction = match tokio::task::spawn_blocking(move || extractor.extract(&body)).await {
            Ok(extraction) => extraction,
            Err(e) => {
                let reason = format!("Extraction task failed: {}", e);
                return PipelineOutcome::failed(report.fail(reason, start.elapsed()));
            }
        };
        sink.record(DiagnosticEvent::new(
            search_id,
            EventKind::ExtractionCompleted {
                source,
                strategy: extraction.strategy,
                candidate_count: extraction.candidates.len(),
                errors: extraction.errors.clone(),
            },
        ));

        report.strategy = extraction.strategy;
        report.raw_candidates = extraction.candidates.len();
        report.state = PipelineState::Done;
        report.elapsed = start.elapsed();
        tracing::info!(
            %search_id,
            %source,
            candidates = report.raw_candidates,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Source pipeline finished"
        );

        PipelineOutcome {
            report,
            extraction: Some(extraction),
        }
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Entry point for multi-source searches
pub struct SearchOrchestrator {
    /// One slot per source in merge order; `None` marks an unavailable source
    slots: Vec<(Source, Option<SourcePipeline>)>,
    merger: MergeDeduplicator,
    deadline: Duration,
    sink: Arc<dyn DiagnosticsSink>,
}

impl SearchOrchestrator {
    /// Orchestrator over the given pipelines; sources without one are unavailable
    pub fn new(pipelines: Vec<SourcePipeline>, config: &SearchConfig) -> Self {
        let mut slots: Vec<(Source, Option<SourcePipeline>)> =
            Source::ALL.iter().map(|source| (*source, None)).collect();
        for pipeline in pipelines {
            if let Some(slot) = slots.iter_mut().find(|(source, _)| *source == pipeline.source) {
                slot.1 = Some(pipeline);
            }
        }

        Self {
            slots,
            merger: MergeDeduplicator::new(config.per_source_cap),
            deadline: config.deadline(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Build live pipelines for every enabled source.
    ///
    /// A source whose pipeline cannot be built is logged and left unavailable.
    pub fn from_config(config: &Config) -> Self {
        let pipelines = Source::ALL
            .into_iter()
            .filter_map(|source| {
                if !config.sources.get(source).enabled {
                    tracing::info!(%source, "Source disabled by configuration");
                    return None;
                }
                match SourcePipeline::from_config(source, config) {
                    Ok(pipeline) => Some(pipeline),
                    Err(e) => {
                        tracing::warn!(%source, "Failed to build source pipeline: {}", e);
                        None
                    }
                }
            })
            .collect();
        Self::new(pipelines, &config.search)
    }

    /// Replace the diagnostics sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the end-to-end deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sources that have a pipeline
    pub fn available_sources(&self) -> Vec<Source> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.is_some())
            .map(|(source, _)| *source)
            .collect()
    }

    /// Search every source for `keyword` on `page` (1-based)
    pub async fn search(&self, keyword: &str, page: u32) -> Result<MergedResultSet, SearchError> {
        let request = SearchRequest::new(keyword, page)?;
        self.search_with_report(&request, &CancelToken::new())
            .await
            .into_result()
    }

    /// Run a search and report on every source
    pub async fn search_with_report(
        &self,
        request: &SearchRequest,
        cancel: &CancelToken,
    ) -> SearchReport {
        let search_id = Uuid::new_v4();
        let start = Instant::now();
        let mut state = SearchState::Idle;
        tracing::info!(
            %search_id,
            keyword = request.keyword(),
            page = request.page(),
            "Starting search"
        );

        advance(search_id, &mut state, SearchState::Fetching);
        let deadline = tokio::time::Instant::now() + self.deadline;
        let sink = self.sink.as_ref();
        let runs = self.slots.iter().map(|(source, slot)| {
            let source = *source;
            async move {
                let Some(pipeline) = slot else {
                    return PipelineOutcome::failed(
                        SourceReport::new(source).fail(UNAVAILABLE, Duration::ZERO),
                    );
                };
                match tokio::time::timeout_at(deadline, pipeline.run(request, cancel, search_id, sink))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        let reason = format!("Deadline of {:?} exceeded", self.deadline);
                        PipelineOutcome::failed(SourceReport::new(source).fail(reason, start.elapsed()))
                    }
                }
            }
        });
        let outcomes = join_all(runs).await;

        for outcome in outcomes.iter().filter(|o| o.report.is_failed()) {
            self.sink.record(DiagnosticEvent::new(
                search_id,
                EventKind::SourceFailed {
                    source: outcome.report.source,
                    reason: outcome.report.failure.clone().unwrap_or_default(),
                },
            ));
        }

        let mut reports = Vec::with_capacity(outcomes.len());
        let mut results = MergedResultSet::default();

        if outcomes.iter().all(|o| o.report.is_failed()) {
            advance(search_id, &mut state, SearchState::AllSourcesFailed);
            reports.extend(outcomes.into_iter().map(|o| o.report));
        } else {
            advance(search_id, &mut state, SearchState::Extracting);
            let mut lists = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                let mut report = outcome.report;
                if let Some(extraction) = outcome.extraction {
                    let list = relevant_results(&extraction, request.keyword(), report.source);
                    report.relevant = list.len();
                    lists.push(list);
                }
                reports.push(report);
            }

            advance(search_id, &mut state, SearchState::Merging);
            results = self.merger.merge_all(lists);
            advance(search_id, &mut state, SearchState::Done);
        }

        let failed_sources: Vec<Source> = reports
            .iter()
            .filter(|r| r.is_failed())
            .map(|r| r.source)
            .collect();
        self.sink.record(DiagnosticEvent::new(
            search_id,
            EventKind::SearchCompleted {
                results: results.len(),
                failed_sources,
            },
        ));

        SearchReport {
            search_id,
            keyword: request.keyword().to_string(),
            page: request.page(),
            state,
            sources: reports,
            results,
            elapsed: start.elapsed(),
        }
    }
}

/// Relevant candidates of one source, normalized, in extraction order
fn relevant_results(extraction: &Extraction, keyword: &str, source: Source) -> Vec<NormalizedResult> {
    extraction
        .candidates
        .iter()
        .filter(|candidate| is_relevant(candidate, keyword))
        .map(|candidate| normalize(candidate, source))
        .collect()
}

fn advance(search_id: Uuid, state: &mut SearchState, next: SearchState) {
    debug_assert!(
        state.can_advance_to(next),
        "invalid search transition {:?} -> {:?}",
        state,
        next
    );
    tracing::debug!(%search_id, from = ?*state, to = ?next, "Search state changed");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;
    use crate::scraping::{FetchError, FetchedPage};
    use crate::search::diagnostics::MemorySink;
    use async_trait::async_trait;
    use url::Url;

    enum FakeFetcher {
        Page(String),
        Status(u16),
        Hang,
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(
            &self,
            url: &Url,
            _referer: &Url,
            cancel: &CancelToken,
        ) -> Result<FetchedPage, FetchError> {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }
            match self {
                FakeFetcher::Page(body) => Ok(FetchedPage {
                    final_url: url.clone(),
                    status_code: 200,
                    body: body.clone(),
                    user_agent: "test-agent".to_string(),
                    fetch_duration: Duration::ZERO,
                }),
                FakeFetcher::Status(code) => Err(FetchError::Status(*code)),
                FakeFetcher::Hang => {
                    cancel.run(std::future::pending::<()>()).await?;
                    Err(FetchError::Cancelled)
                }
            }
        }
    }

    fn pipeline(source: Source, fetcher: FakeFetcher) -> SourcePipeline {
        let profile = source.profile();
        SourcePipeline::new(
            source,
            Arc::new(fetcher),
            Arc::new(ResultExtractor::for_profile(profile).unwrap()),
            Endpoints::resolve(profile, &SourceConfig::default()).unwrap(),
        )
    }

    fn orchestrator(pipelines: Vec<SourcePipeline>) -> SearchOrchestrator {
        SearchOrchestrator::new(pipelines, &SearchConfig::default())
    }

    fn baidu_page(titles: &[&str]) -> String {
        let cards: String = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                format!(
                    r#"<div class="result c-container" id="{i}">
                         <h3 class="t"><a href="http://www.baidu.com/link?url=result{i}abcdefghij">{title}</a></h3>
                         <div class="c-abstract">A summary long enough to be kept as an abstract.</div>
                       </div>"#
                )
            })
            .collect();
        format!(
            r#"<html><body><div id="content_left">百度为您找到相关结果约100个{cards}</div></body></html>"#
        )
    }

    fn bilibili_page(titles: &[&str]) -> String {
        let cards: String = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                format!(
                    r#"<li class="video-list-item" data-id="{i}">
                         <a class="title" href="//www.bilibili.com/video/BV1xx411c7m{i}">{title}</a>
                         <span class="up-name">Alice</span>
                       </li>"#
                )
            })
            .collect();
        format!(r#"<html><body><ul class="video-list">{cards}</ul></body></html>"#)
    }

    #[tokio::test]
    async fn test_rust_search_with_bilibili_unavailable() {
        let page = baidu_page(&["Rust 官方网站", "The Rust Book", "Go by Example", "rust-analyzer 插件"]);
        let orchestrator = orchestrator(vec![pipeline(Source::Baidu, FakeFetcher::Page(page))]);

        let request = SearchRequest::new("rust", 1).unwrap();
        let report = orchestrator.search_with_report(&request, &CancelToken::new()).await;

        assert_eq!(report.state, SearchState::Done);
        assert_eq!(report.results.len(), 3);
        assert!(report.results.iter().all(|r| r.source == "Baidu"));
        assert_eq!(report.results.as_slice()[0].title, "Rust 官方网站");

        let baidu = &report.sources[0];
        assert_eq!(baidu.state, PipelineState::Done);
        assert_eq!(baidu.strategy, Some(Strategy::Semantic));
        assert_eq!(baidu.raw_candidates, 4);
        assert_eq!(baidu.relevant, 3);
        assert!(baidu.result_marker);

        let bilibili = &report.sources[1];
        assert_eq!(bilibili.state, PipelineState::Failed);
        assert_eq!(bilibili.failure.as_deref(), Some(UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_zero_candidates_is_empty_success() {
        let empty = "<html><body></body></html>".to_string();
        let orchestrator = orchestrator(vec![
            pipeline(Source::Baidu, FakeFetcher::Page(empty.clone())),
            pipeline(Source::Bilibili, FakeFetcher::Page(empty)),
        ]);

        let results = orchestrator.search("rust", 1).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_all_sources_failed() {
        let orchestrator = orchestrator(vec![pipeline(Source::Bilibili, FakeFetcher::Status(412))]);

        match orchestrator.search("rust", 1).await {
            Err(SearchError::AllSourcesFailed { failures }) => {
                assert_eq!(failures.len(), 2);
                assert_eq!(failures[0].source, Source::Baidu);
                assert_eq!(failures[0].reason, UNAVAILABLE);
                assert_eq!(failures[1].source, Source::Bilibili);
                assert!(failures[1].reason.contains("412"));
            }
            other => panic!("expected AllSourcesFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_query_rejected() {
        let orchestrator = orchestrator(vec![]);
        assert!(matches!(
            orchestrator.search("   ", 1).await,
            Err(SearchError::InvalidQuery(QueryError::EmptyKeyword))
        ));
        assert!(matches!(
            orchestrator.search("rust", 0).await,
            Err(SearchError::InvalidQuery(QueryError::InvalidPage))
        ));
    }

    #[tokio::test]
    async fn test_per_source_cap_and_order() {
        let baidu_titles: Vec<String> = (0..8).map(|i| format!("Rust article {i}")).collect();
        let baidu_refs: Vec<&str> = baidu_titles.iter().map(String::as_str).collect();
        let orchestrator = orchestrator(vec![
            pipeline(Source::Bilibili, FakeFetcher::Page(bilibili_page(&["Rust 教程 一", "Rust 教程 二"]))),
            pipeline(Source::Baidu, FakeFetcher::Page(baidu_page(&baidu_refs))),
        ]);

        let results = orchestrator.search("rust", 1).await.unwrap().into_vec();
        assert_eq!(results.len(), 7);
        assert!(results[..5].iter().all(|r| r.source == "Baidu"));
        assert!(results[5..].iter().all(|r| r.source == "Bilibili"));
        assert_eq!(results[5].summary, "Author: Alice");
        assert_eq!(results[5].url, "https://www.bilibili.com/video/BV1xx411c7m0");
    }

    #[tokio::test]
    async fn test_blocked_page_still_extracted() {
        let page = baidu_page(&["Rust 编程"]).replace("<body>", "<body>百度安全验证");
        let sink = Arc::new(MemorySink::new());
        let orchestrator = orchestrator(vec![pipeline(Source::Baidu, FakeFetcher::Page(page))])
            .with_sink(sink.clone());

        let request = SearchRequest::new("rust", 1).unwrap();
        let report = orchestrator.search_with_report(&request, &CancelToken::new()).await;

        assert_eq!(report.state, SearchState::Done);
        assert!(report.sources[0].blocked);
        assert_eq!(report.results.len(), 1);

        let events = sink.events();
        assert!(events.iter().all(|e| e.search_id == report.search_id));
        assert!(events.iter().any(|e| matches!(
            e.kind,
            EventKind::FetchCompleted { source: Source::Baidu, blocked: true, .. }
        )));
        assert!(events.iter().any(|e| matches!(
            e.kind,
            EventKind::SourceFailed { source: Source::Bilibili, .. }
        )));
        assert!(matches!(
            events.last().map(|e| &e.kind),
            Some(EventKind::SearchCompleted { results: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_deadline_fails_slow_source_only() {
        let orchestrator = orchestrator(vec![
            pipeline(Source::Baidu, FakeFetcher::Page(baidu_page(&["Rust 官方网站"]))),
            pipeline(Source::Bilibili, FakeFetcher::Hang),
        ])
        .with_deadline(Duration::from_millis(100));

        let request = SearchRequest::new("rust", 1).unwrap();
        let report = orchestrator.search_with_report(&request, &CancelToken::new()).await;

        assert_eq!(report.state, SearchState::Done);
        assert_eq!(report.results.len(), 1);
        let bilibili = &report.sources[1];
        assert!(bilibili.is_failed());
        assert!(bilibili.failure.as_deref().unwrap().contains("Deadline"));
    }

    #[tokio::test]
    async fn test_cancelled_search_fails_every_source() {
        let orchestrator = orchestrator(vec![
            pipeline(Source::Baidu, FakeFetcher::Hang),
            pipeline(Source::Bilibili, FakeFetcher::Hang),
        ]);
        let cancel = CancelToken::new();
        cancel.cancel();

        let request = SearchRequest::new("rust", 1).unwrap();
        let report = orchestrator.search_with_report(&request, &cancel).await;

        assert_eq!(report.state, SearchState::AllSourcesFailed);
        assert!(report.results.is_empty());
        assert_eq!(report.failures().len(), 2);
        assert!(report.failures()[0].reason.contains("cancelled"));
    }

    #[tokio::test]
    async fn test_text_fallback_passes_relevance() {
        let page = format!("<html><body><p>{}</p></body></html>", "页面内容".repeat(20));
        let orchestrator = orchestrator(vec![pipeline(Source::Bilibili, FakeFetcher::Page(page))]);

        let results = orchestrator.search("rust", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        let result = &results.as_slice()[0];
        assert_eq!(result.title, crate::types::UNTITLED);
        assert_eq!(result.url, "");
        assert_eq!(result.source, "Bilibili");
    }

    #[test]
    fn test_state_transitions() {
        use SearchState::*;
        assert!(Idle.can_advance_to(Fetching));
        assert!(Fetching.can_advance_to(AllSourcesFailed));
        assert!(Merging.can_advance_to(Done));
        assert!(!Idle.can_advance_to(Done));
        assert!(!Done.can_advance_to(Fetching));
    }

    #[test]
    fn test_from_config_skips_disabled_sources() {
        let mut config = Config::default();
        config.sources.bilibili.enabled = false;
        let orchestrator = SearchOrchestrator::from_config(&config);
        assert_eq!(orchestrator.available_sources(), vec![Source::Baidu]);
    }
}
