use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use dsearch::{
    config::Config,
    scraping::CancelToken,
    search::{HistoryDeduplicator, SearchOrchestrator, SearchReport, SearchState},
    types::{NormalizedResult, SearchRequest},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct SearchArgs {
    pub keyword: String,
    pub page: u32,
    pub pages: u32,
    pub format: OutputFormat,
    pub save: bool,
    pub output_dir: PathBuf,
}

pub async fn run_search(config: Config, args: SearchArgs) -> Result<()> {
    let orchestrator = SearchOrchestrator::from_config(&config);
    info!("Searching for: {} ({:?})", args.keyword, orchestrator.available_sources());

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut rng = match config.session.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut history = HistoryDeduplicator::new();
    let mut collected: Vec<NormalizedResult> = Vec::new();
    let mut reports: Vec<SearchReport> = Vec::new();

    let last_page = args.page.saturating_add(args.pages.max(1) - 1);
    for page in args.page..=last_page {
        if page > args.page {
            let delay = config.session.page_delay.sample(&mut rng);
            info!("Waiting {:.1}s before page {}", delay.as_secs_f64(), page);
            if cancel.run(tokio::time::sleep(delay)).await.is_err() {
                break;
            }
        }

        let request = SearchRequest::new(&args.keyword, page)?;
        let report = orchestrator.search_with_report(&request, &cancel).await;
        let all_failed = report.state == SearchState::AllSourcesFailed;
        collected.extend(history.filter_new(report.results.iter().cloned()));
        reports.push(report);

        if all_failed || cancel.is_cancelled() {
            break;
        }
    }

    match args.format {
        OutputFormat::Json => print_json(&args.keyword, &collected, &reports)?,
        OutputFormat::Text => print_text(&args.keyword, &collected, &reports),
    }

    if args.save && !collected.is_empty() {
        let now = Local::now();
        let path = args.output_dir.join(report_file_name(&args.keyword, now));
        std::fs::write(&path, render_report(&args.keyword, &collected, now))
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        eprintln!("Saved report: {}", path.display());
    }

    if let Some(failed) = reports.iter().find(|r| r.state == SearchState::AllSourcesFailed) {
        for failure in failed.failures() {
            eprintln!("  {}", failure);
        }
        anyhow::bail!("All sources failed for page {}", failed.page);
    }
    Ok(())
}

fn print_text(keyword: &str, results: &[NormalizedResult], reports: &[SearchReport]) {
    for report in reports {
        for source in &report.sources {
            let status = match &source.failure {
                Some(reason) => format!("failed: {}", reason),
                None => format!(
                    "{} candidates, {} relevant{}",
                    source.raw_candidates,
                    source.relevant,
                    if source.blocked { " (possible verification page)" } else { "" }
                ),
            };
            eprintln!("[page {}] {}: {}", report.page, source.source, status);
        }
    }

    println!("\nSearch results for \"{}\" ({} found):\n", keyword, results.len());
    for (i, result) in results.iter().enumerate() {
        println!("{}. {}", i + 1, result.title);
        if !result.url.is_empty() {
            println!("   URL: {}", result.url);
        }
        println!("   Source: {}", result.source);
        for line in result.summary.lines().filter(|l| !l.trim().is_empty()) {
            println!("   {}", line);
        }
        println!();
    }
}

fn print_json(keyword: &str, results: &[NormalizedResult], reports: &[SearchReport]) -> Result<()> {
    let pages: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            let sources: Vec<serde_json::Value> = report
                .sources
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "source": s.source,
                        "state": s.state,
                        "blocked": s.blocked,
                        "result_marker": s.result_marker,
                        "strategy": s.strategy,
                        "candidates": s.raw_candidates,
                        "relevant": s.relevant,
                        "failure": s.failure,
                        "elapsed_ms": s.elapsed.as_millis() as u64,
                    })
                })
                .collect();
            serde_json::json!({
                "page": report.page,
                "search_id": report.search_id,
                "state": report.state,
                "sources": sources,
            })
        })
        .collect();

    let response = serde_json::json!({
        "keyword": keyword,
        "total": results.len(),
        "results": results,
        "pages": pages,
    });
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// `search_<keyword>_<YYYYmmdd_HHMMSS>.txt`, with path-hostile characters replaced
pub fn report_file_name(keyword: &str, at: DateTime<Local>) -> String {
    let safe: String = keyword
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() || "/\\:*?\"<>|".contains(c) { '_' } else { c })
        .collect();
    format!("search_{}_{}.txt", safe, at.format("%Y%m%d_%H%M%S"))
}

/// Plain-text report listing every result
pub fn render_report(keyword: &str, results: &[NormalizedResult], at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search results - keyword: {}", keyword);
    let _ = writeln!(out, "Time: {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Found {} results", results.len());
    let _ = writeln!(out, "{}\n", "=".repeat(80));

    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(out, "Result {}:", i + 1);
        let _ = writeln!(out, "Title: {}", result.title);
        if !result.url.is_empty() {
            let _ = writeln!(out, "URL: {}", result.url);
        }
        if !result.summary.is_empty() {
            let _ = writeln!(out, "Summary: {}", result.summary);
        }
        let _ = writeln!(out, "Source: {}", result.source);
        let _ = writeln!(out, "{}\n", "-".repeat(80));
    }
    out
}
