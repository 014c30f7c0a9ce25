//! Source-facing half of the search engine
//!
//! Everything that touches a source's HTML or network endpoint lives here:
//! - `SourceProfile`: static per-source endpoints, fingerprint and extraction hints
//! - `RequestSession`: browser-like fetch with warm-up and humanizing delays
//! - `BlockDetector`: advisory anti-bot page detection
//! - `ResultExtractor`: semantic, link-heuristic and text-block extraction cascade

pub mod block;
pub mod extractor;
pub mod profile;
pub mod session;

pub use block::BlockDetector;
pub use extractor::{ExtractError, Extraction, ExtractorConfig, ResultExtractor, Strategy};
pub use profile::{Endpoints, SourceProfile};
pub use session::{CancelToken, FetchError, FetchedPage, PageFetcher, RequestSession};
