//! Worker-pool pipeline for article pages
//!
//! A fixed number of workers share one job channel. Each worker takes a URL,
//! fetches the page, extracts the body and writes it out before taking the
//! next one, so one article's failure never touches another.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────────────────┐     ┌─────────────┐
//! │   URL       │     │   Workers (fetch, extract,   │     │   Result    │
//! │  Producer   │────▶│   save) x N                  │────▶│  Collector  │
//! └─────────────┘     └──────────────────────────────┘     └─────────────┘
//!       │                        │                                │
//!  mpsc channel             per-job timeout                  Progress/Stats
//! ```
//!
//! # Example
//!
//! ```no_run
//! use naver_corpus::crawler::fetcher::NaverFetcher;
//! use naver_corpus::crawler::pipeline::PipelineBuilder;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fetcher = Arc::new(NaverFetcher::new(10)?);
//! let pipeline = PipelineBuilder::new()
//!     .workers(8)
//!     .output_dir(PathBuf::from("./20240101"))
//!     .build(fetcher)?;
//!
//! let urls = vec!["https://n.news.naver.com/mnews/article/001/0014123456".to_string()];
//! let stats = pipeline.run(urls).await?;
//!
//! println!("Saved {} articles", stats.saved_count);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::headers::section_referer;
use crate::crawler::url::is_fetchable_url;
use crate::models::{AbsenceReason, ExtractedArticle};
use crate::parser::ContentExtractor;
use crate::storage::TextWriter;
use crate::utils::error::FetchError;

// ============================================================================
// Configuration
// ============================================================================

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of article workers
    pub workers: usize,

    /// Channel buffer size
    pub channel_buffer_size: usize,

    /// Directory article files are written to
    pub output_dir: PathBuf,

    /// Upper bound on one article's fetch, retries included
    pub job_timeout: Duration,

    /// Body extraction settings
    pub extractor: ContentExtractor,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            channel_buffer_size: 1000,
            output_dir: PathBuf::from("."),
            job_timeout: Duration::from_secs(150),
            extractor: ContentExtractor::default(),
        }
    }
}

impl PipelineConfig {
    /// Pipeline settings for one day's output directory
    pub fn from_config(config: &Config, output_dir: PathBuf) -> Self {
        // Every attempt may run into the request timeout; leave room for backoff too
        let attempts = config.crawler.max_retries.saturating_add(2);
        let job_timeout = config
            .request_timeout()
            .checked_mul(attempts)
            .unwrap_or(Duration::MAX);

        Self {
            workers: config.crawler.max_concurrent_requests,
            output_dir,
            job_timeout,
            extractor: ContentExtractor::from_config(&config.extract),
            ..Self::default()
        }
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Message from URL producer to workers
#[derive(Debug, Clone)]
pub struct FetchJob {
    /// URL to fetch
    pub url: String,

    /// Job ID for tracking
    pub job_id: u64,
}

/// Result message for tracking
#[derive(Debug, Clone)]
pub enum JobResult {
    /// Body written to disk
    Saved { job_id: u64, path: PathBuf },
    /// Page fetched but filtered out; nothing written
    Rejected {
        job_id: u64,
        url: String,
        reason: AbsenceReason,
    },
    /// Page could not be fetched or saved
    Failed {
        job_id: u64,
        url: String,
        error: String,
        timed_out: bool,
    },
}

// ============================================================================
// Pipeline Statistics
// ============================================================================

/// Pipeline statistics (thread-safe)
#[derive(Debug, Default)]
pub struct PipelineStats {
    /// Total jobs submitted
    pub total_jobs: AtomicU64,

    /// Articles written to disk
    pub saved_count: AtomicU64,

    /// Articles filtered out by extraction
    pub rejected_count: AtomicU64,

    /// Jobs that failed to fetch or save
    pub failed_count: AtomicU64,

    /// Failed jobs that timed out
    pub timeout_count: AtomicU64,

    /// Total bytes fetched
    pub bytes_fetched: AtomicU64,

    /// Rejections per reason, indexed like [`AbsenceReason::all`]
    rejected_by_reason: [AtomicU64; 4],
}

impl PipelineStats {
    /// Create new stats counter
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record saved article
    pub fn record_saved(&self) {
        self.saved_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record rejected article
    pub fn record_rejected(&self, reason: AbsenceReason) {
        self.rejected_count.fetch_add(1, Ordering::Relaxed);
        self.rejected_by_reason[reason_index(reason)].fetch_add(1, Ordering::Relaxed);
    }

    /// Record failed job
    pub fn record_failure(&self, timed_out: bool) {
        self.failed_count.fetch_add(1, Ordering::Relaxed);
        if timed_out {
            self.timeout_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record bytes fetched
    pub fn record_bytes(&self, bytes: u64) {
        self.bytes_fetched.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Get snapshot of current stats
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_jobs: self.total_jobs.load(Ordering::Relaxed),
            saved_count: self.saved_count.load(Ordering::Relaxed),
            rejected_count: self.rejected_count.load(Ordering::Relaxed),
            failed_count: self.failed_count.load(Ordering::Relaxed),
            timeout_count: self.timeout_count.load(Ordering::Relaxed),
            bytes_fetched: self.bytes_fetched.load(Ordering::Relaxed),
            rejected_by_reason: AbsenceReason::all()
                .map(|reason| self.rejected_by_reason[reason_index(reason)].load(Ordering::Relaxed)),
        }
    }
}

fn reason_index(reason: AbsenceReason) -> usize {
    match reason {
        AbsenceReason::StructuralMissing => 0,
        AbsenceReason::EmptyAfterStrip => 1,
        AbsenceReason::LowKoreanRatio => 2,
        AbsenceReason::EmptyAfterFilter => 3,
    }
}

/// Snapshot of pipeline statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_jobs: u64,
    pub saved_count: u64,
    pub rejected_count: u64,
    pub failed_count: u64,
    pub timeout_count: u64,
    pub bytes_fetched: u64,
    rejected_by_reason: [u64; 4],
}

impl StatsSnapshot {
    /// Rejections recorded for `reason`
    pub fn rejected_for(&self, reason: AbsenceReason) -> u64 {
        self.rejected_by_reason[reason_index(reason)]
    }

    /// Share of processed jobs that produced a file (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        let total = self.saved_count + self.rejected_count + self.failed_count;
        if total == 0 {
            return 1.0;
        }
        self.saved_count as f64 / total as f64
    }
}

// ============================================================================
// Pipeline Implementation
// ============================================================================

/// Article pipeline over a bounded worker pool
pub struct CrawlerPipeline<F: PageFetcher> {
    config: PipelineConfig,
    fetcher: Arc<F>,
    writer: TextWriter,
    stats: Arc<PipelineStats>,
}

impl<F: PageFetcher + 'static> CrawlerPipeline<F> {
    /// Create a new pipeline; the output directory is created here
    pub fn new(config: PipelineConfig, fetcher: Arc<F>) -> Result<Self> {
        let writer = TextWriter::new(&config.output_dir)?;

        Ok(Self {
            config,
            fetcher,
            writer,
            stats: PipelineStats::new(),
        })
    }

    /// Run every URL through fetch, extraction and storage
    ///
    /// Returns once all jobs are done. Individual failures are counted, never
    /// propagated.
    pub async fn run(&self, urls: Vec<String>) -> Result<StatsSnapshot> {
        let total_urls = urls.len() as u64;
        self.stats.total_jobs.store(total_urls, Ordering::Relaxed);

        tracing::info!(
            total = total_urls,
            workers = self.config.workers,
            output = %self.config.output_dir.display(),
            "Starting article pipeline"
        );

        let (fetch_tx, fetch_rx) = mpsc::channel::<FetchJob>(self.config.channel_buffer_size.max(1));
        let (result_tx, mut result_rx) =
            mpsc::channel::<JobResult>(self.config.channel_buffer_size.max(1));

        let worker_handles = self.spawn_workers(fetch_rx, result_tx.clone());

        // Spawn result collector
        let stats = Arc::clone(&self.stats);
        let result_handle = tokio::spawn(async move {
            while let Some(result) = result_rx.recv().await {
                match result {
                    JobResult::Saved { job_id, path } => {
                        stats.record_saved();
                        tracing::debug!(job_id, path = %path.display(), "Article saved");
                    }
                    JobResult::Rejected {
                        job_id,
                        url,
                        reason,
                    } => {
                        stats.record_rejected(reason);
                        tracing::info!(job_id, url, reason = %reason, "Article rejected");
                    }
                    JobResult::Failed {
                        job_id,
                        url,
                        error,
                        timed_out,
                    } => {
                        stats.record_failure(timed_out);
                        tracing::warn!(job_id, url, error, timed_out, "Article failed");
                    }
                }
            }
        });

        // Send URLs to the job channel
        for (idx, url) in urls.into_iter().enumerate() {
            let job = FetchJob {
                url,
                job_id: idx as u64,
            };

            if fetch_tx.send(job).await.is_err() {
                tracing::error!("Failed to send fetch job - channel closed");
                break;
            }
        }

        // Close job channel to signal completion
        drop(fetch_tx);

        for handle in worker_handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Worker task panicked");
            }
        }

        drop(result_tx);
        let _ = result_handle.await;

        let snapshot = self.stats.snapshot();
        tracing::info!(
            saved = snapshot.saved_count,
            rejected = snapshot.rejected_count,
            failed = snapshot.failed_count,
            timeouts = snapshot.timeout_count,
            bytes = snapshot.bytes_fetched,
            "Pipeline completed"
        );

        Ok(snapshot)
    }

    /// Spawn worker tasks sharing one receiver
    fn spawn_workers(
        &self,
        fetch_rx: mpsc::Receiver<FetchJob>,
        result_tx: mpsc::Sender<JobResult>,
    ) -> Vec<JoinHandle<()>> {
        let fetch_rx = Arc::new(tokio::sync::Mutex::new(fetch_rx));
        let workers = self.config.workers.max(1);
        let mut handles = Vec::with_capacity(workers);

        for worker_id in 0..workers {
            let fetch_rx = Arc::clone(&fetch_rx);
            let result_tx = result_tx.clone();
            let stats = Arc::clone(&self.stats);
            let fetcher = Arc::clone(&self.fetcher);
            let writer = self.writer.clone();
            let extractor = self.config.extractor;
            let job_timeout = self.config.job_timeout;

            let handle = tokio::spawn(async move {
                let referer = section_referer(None);

                loop {
                    let job = {
                        let mut rx = fetch_rx.lock().await;
                        rx.recv().await
                    };

                    let Some(job) = job else {
                        break; // Channel closed
                    };

                    tracing::debug!(worker_id, job_id = job.job_id, url = %job.url, "Fetching");

                    let result = process_job(
                        job,
                        fetcher.as_ref(),
                        &referer,
                        &extractor,
                        &writer,
                        job_timeout,
                        &stats,
                    )
                    .await;

                    if result_tx.send(result).await.is_err() {
                        tracing::error!("Result channel closed");
                        break;
                    }
                }

                tracing::debug!(worker_id, "Worker shutting down");
            });

            handles.push(handle);
        }

        handles
    }

    /// Get current statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

/// Fetch, extract and store one article
async fn process_job<F: PageFetcher + ?Sized>(
    job: FetchJob,
    fetcher: &F,
    referer: &str,
    extractor: &ContentExtractor,
    writer: &TextWriter,
    job_timeout: Duration,
    stats: &PipelineStats,
) -> JobResult {
    let FetchJob { url, job_id } = job;

    if !is_fetchable_url(&url) {
        return JobResult::Failed {
            job_id,
            error: FetchError::InvalidUrl(url.clone()).to_string(),
            url,
            timed_out: false,
        };
    }

    let fetched = match tokio::time::timeout(job_timeout, fetcher.fetch_page(&url, referer)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout),
    };

    let html = match fetched {
        Ok(html) => html,
        Err(e) => {
            return JobResult::Failed {
                job_id,
                url,
                timed_out: matches!(e, FetchError::Timeout),
                error: e.to_string(),
            };
        }
    };

    stats.record_bytes(html.len() as u64);

    match extractor.extract(&html) {
        ExtractedArticle::Present(text) => match writer.save(&text) {
            Ok(path) => JobResult::Saved { job_id, path },
            Err(e) => JobResult::Failed {
                job_id,
                url,
                error: format!("Storage error: {e:#}"),
                timed_out: false,
            },
        },
        ExtractedArticle::Absent(reason) => JobResult::Rejected {
            job_id,
            url,
            reason,
        },
    }
}

// ============================================================================
// Pipeline Builder
// ============================================================================

/// Builder for CrawlerPipeline
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set number of workers
    pub fn workers(mut self, count: usize) -> Self {
        self.config.workers = count;
        self
    }

    /// Set channel buffer size
    pub fn channel_buffer_size(mut self, size: usize) -> Self {
        self.config.channel_buffer_size = size;
        self
    }

    /// Set output directory
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.config.output_dir = path;
        self
    }

    /// Set per-article timeout
    pub fn job_timeout(mut self, timeout: Duration) -> Self {
        self.config.job_timeout = timeout;
        self
    }

    /// Set extraction settings
    pub fn extractor(mut self, extractor: ContentExtractor) -> Self {
        self.config.extractor = extractor;
        self
    }

    /// Build the pipeline
    pub fn build<F: PageFetcher + 'static>(self, fetcher: Arc<F>) -> Result<CrawlerPipeline<F>> {
        CrawlerPipeline::new(self.config, fetcher)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
