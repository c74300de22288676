use anyhow::{Context, Result};
use std::sync::Arc;

use naver_corpus::config::Config;
use naver_corpus::crawler::date::DateRange;
use naver_corpus::crawler::fetcher::NaverFetcher;
use naver_corpus::crawler::list::{build_listing_requests, NewsListCrawler};
use naver_corpus::crawler::pipeline::{CrawlerPipeline, PipelineConfig, StatsSnapshot};
use naver_corpus::models::AbsenceReason;

/// Crawl one day: collect every article URL, then fetch and store each body
///
/// Files are written to `{output root}/{day}/`. Ctrl+C stops the article
/// phase; files already written are kept.
pub async fn crawl(config: Config, day: &str) -> Result<()> {
    let range = DateRange::single_day(day).with_context(|| format!("Invalid --day: {day}"))?;
    let categories = config.categories();

    println!("Starting Naver News Crawl");
    println!("========================");
    println!("Day: {day}");
    println!(
        "Categories: {}",
        categories
            .iter()
            .map(|c| format!("{} ({})", c.korean_name(), c.to_section_id()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Pages per category: {}", config.listing.max_page);

    let requests = build_listing_requests(&categories, &range, config.listing.max_page)?;

    let fetcher = Arc::new(NaverFetcher::from_config(&config).context("Failed to create fetcher")?);

    let list_crawler =
        NewsListCrawler::new(Arc::clone(&fetcher), config.crawler.max_concurrent_requests);
    let listing = list_crawler.collect_urls(requests).await;

    println!("Found {} article URLs", listing.urls.len());
    if listing.pages_failed > 0 {
        println!(
            "Listing pages failed: {} of {}",
            listing.pages_failed,
            listing.pages_failed + listing.pages_fetched
        );
    }

    let output_dir = config.output.root.join(day);
    let pipeline = CrawlerPipeline::new(
        PipelineConfig::from_config(&config, output_dir.clone()),
        fetcher,
    )?;

    let urls = listing.urls.into_sorted_vec();

    println!("Fetching articles...");
    let stats = tokio::select! {
        stats = pipeline.run(urls) => stats?,
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::error!("Failed to wait for Ctrl+C: {}", e);
            }
            println!("\nShutdown signal received, stopping...");
            pipeline.stats()
        }
    };

    print_summary(&stats);
    println!("Output directory: {}", output_dir.display());

    Ok(())
}

fn print_summary(stats: &StatsSnapshot) {
    println!("\nCrawl Summary");
    println!("=============");
    println!("Total articles: {}", stats.total_jobs);
    println!("Saved: {}", stats.saved_count);
    println!("Rejected: {}", stats.rejected_count);
    for reason in AbsenceReason::all() {
        let count = stats.rejected_for(reason);
        if count > 0 {
            println!("  {reason}: {count}");
        }
    }
    println!(
        "Failed: {} (timeouts: {})",
        stats.failed_count, stats.timeout_count
    );
    println!("Success rate: {:.1}%", stats.success_rate() * 100.0);
}
