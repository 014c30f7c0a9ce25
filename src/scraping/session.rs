//! Request session for search sources
//!
//! Every fetch runs in a fresh HTTP session that looks like a browser visit:
//! - A user agent picked at random from the source's pool
//! - The source's static header set and seed cookies
//! - A humanizing delay, then a warm-up GET of the landing page to collect cookies
//! - A second delay, then the real request with the landing page as referer
//!
//! Delays and network calls race a [`CancelToken`] so an abandoned search
//! stops at the next fetch boundary.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Notify;
use url::Url;

use super::profile::{Endpoints, SourceProfile};
use crate::config::SessionConfig;

/// Fallback user agent when a profile has an empty pool
const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Errors that can occur during fetching
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{stage} request timed out after {after:?}")]
    Timeout { stage: &'static str, after: Duration },
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Fetch cancelled")]
    Cancelled,
}

/// Result of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The fetched URL (may differ from request due to redirects)
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Response body decoded as UTF-8
    pub body: String,
    /// User agent the session presented
    pub user_agent: String,
    /// Time taken including delays and warm-up
    pub fetch_duration: Duration,
}

/// Cooperative cancellation shared between a caller and its pipelines
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every pipeline holding this token
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Run `fut` unless cancellation arrives first
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, FetchError> {
        tokio::select! {
            _ = self.cancelled() => Err(FetchError::Cancelled),
            out = fut => Ok(out),
        }
    }
}

/// Page fetching seam between the pipeline and the network
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, presenting `referer` as the page the visit came from
    async fn fetch(&self, url: &Url, referer: &Url, cancel: &CancelToken)
        -> Result<FetchedPage, FetchError>;
}

/// Browser-like HTTP session for one source
pub struct RequestSession {
    profile: &'static SourceProfile,
    endpoints: Endpoints,
    config: SessionConfig,
    rng: Mutex<ChaCha8Rng>,
}

impl RequestSession {
    /// Create a session; randomness is seeded from `config.rng_seed` when set
    pub fn new(profile: &'static SourceProfile, endpoints: Endpoints, config: SessionConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            profile,
            endpoints,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Pick a user agent from the source's pool
    pub fn pick_user_agent(&self) -> &'static str {
        let mut rng = self.rng.lock();
        self.profile
            .user_agents
            .choose(&mut *rng)
            .copied()
            .unwrap_or(FALLBACK_USER_AGENT)
    }

    fn sample_delays(&self) -> (Duration, Duration) {
        let mut rng = self.rng.lock();
        (
            self.config.warmup_delay.sample(&mut *rng),
            self.config.query_delay.sample(&mut *rng),
        )
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in self.profile.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Skipping invalid header {}: {}", name, value),
            }
        }
        headers
    }

    /// Build a fresh client whose cookie jar is seeded for the landing and target hosts
    fn build_client(&self, user_agent: &str, target: &Url) -> Result<reqwest::Client, FetchError> {
        let jar = Arc::new(Jar::default());
        for (name, value) in self.profile.seed_cookies {
            let cookie = format!("{}={}", name, value);
            jar.add_cookie_str(&cookie, &self.endpoints.root);
            if target.host_str() != self.endpoints.root.host_str() {
                jar.add_cookie_str(&cookie, target);
            }
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(self.default_headers())
            .cookie_provider(jar)
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(client)
    }

    async fn sleep(&self, delay: Duration, cancel: &CancelToken) -> Result<(), FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        if !delay.is_zero() {
            cancel.run(tokio::time::sleep(delay)).await?;
        }
        Ok(())
    }

    /// Warm-up visit to the landing page; only transport failures are errors
    async fn warm_up(&self, client: &reqwest::Client, cancel: &CancelToken) -> Result<(), FetchError> {
        let timeout = self.config.warmup_timeout();
        let response = cancel
            .run(client.get(self.endpoints.root.as_str()).timeout(timeout).send())
            .await?
            .map_err(|e| classify(e, "warm-up", timeout))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(source = %self.profile.source, status = status.as_u16(), "Warm-up complete");
        } else {
            tracing::warn!(
                source = %self.profile.source,
                status = status.as_u16(),
                "Warm-up returned non-success status, continuing"
            );
        }
        // Drain the body so Set-Cookie handling and the connection complete normally
        if let Err(e) = cancel.run(response.bytes()).await? {
            tracing::debug!(source = %self.profile.source, "Failed to read warm-up body: {}", e);
        }
        Ok(())
    }
}

#[async_trait]
impl PageFetcher for RequestSession {
    async fn fetch(
        &self,
        url: &Url,
        referer: &Url,
        cancel: &CancelToken,
    ) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();
        let user_agent = self.pick_user_agent();
        let (warmup_delay, query_delay) = self.sample_delays();
        let client = self.build_client(user_agent, url)?;

        self.sleep(warmup_delay, cancel).await?;
        self.warm_up(&client, cancel).await?;
        self.sleep(query_delay, cancel).await?;

        let timeout = self.config.request_timeout();
        let response = cancel
            .run(
                client
                    .get(url.as_str())
                    .header(REFERER, referer.as_str())
                    .timeout(timeout)
                    .send(),
            )
            .await?
            .map_err(|e| classify(e, "search", timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let final_url = response.url().clone();

        let bytes = cancel
            .run(response.bytes())
            .await?
            .map_err(|e| classify(e, "search", timeout))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(
            source = %self.profile.source,
            status = status.as_u16(),
            bytes = body.len(),
            "Search page fetched"
        );

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            body,
            user_agent: user_agent.to_string(),
            fetch_duration: start.elapsed(),
        })
    }
}

fn classify(error: reqwest::Error, stage: &'static str, after: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout { stage, after }
    } else {
        FetchError::Http(error)
    }
}
