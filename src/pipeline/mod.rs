// src/pipeline/mod.rs

//! Pipeline orchestrator.
//!
//! Per record: extract → enrich (best-effort) → eligibility filter →
//! admission → notification, in strict order. A rejection or duplicate
//! short-circuits the remaining stages for that record only. Admission runs
//! before notification, so a transport failure after admission is never
//! retried on a later run (at-most-once notify).

pub mod filter;

use chrono::{DateTime, Utc};
use scraper::Html;

use crate::config::Config;
use crate::error::Result;
use crate::services::{DetailEnricher, EnrichOutcome, ListingExtractor, Notifier, PageFetcher};
use crate::storage::SeenStore;

pub use filter::{DropReason, check_eligibility};

/// Summary of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Records extracted from the listing page (already region-filtered)
    pub extracted: usize,
    /// Records whose supplementary link was filled
    pub enriched: usize,
    /// Detail pages that failed to fetch (records kept regardless)
    pub detail_failures: usize,
    /// Records dropped by the eligibility filter
    pub dropped_ineligible: usize,
    /// Records dropped as already seen
    pub dropped_duplicate: usize,
    /// Records newly admitted to the seen store
    pub admitted: usize,
    /// Notifications reported delivered by the transport
    pub notified: usize,
}

impl RunOutcome {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            extracted: 0,
            enriched: 0,
            detail_failures: 0,
            dropped_ineligible: 0,
            dropped_duplicate: 0,
            admitted: 0,
            notified: 0,
        }
    }
}

/// Run one full pipeline pass over the listing page.
///
/// A listing fetch failure aborts the run; detail and transport failures
/// degrade gracefully. The store is flushed once at the end.
pub async fn run_pipeline(
    config: &Config,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    store: &mut SeenStore,
) -> Result<RunOutcome> {
    let mut outcome = RunOutcome::new(Utc::now());

    log::info!("Fetching listing page: {}", config.crawler.listing_url);
    let listing_html = fetcher.fetch(&config.crawler.listing_url).await?;

    let extractor = ListingExtractor::new()?;
    let records = {
        let document = Html::parse_document(&listing_html);
        extractor.extract(&document, &config.filter.estados)
    };
    outcome.extracted = records.len();
    log::info!("Extracted {} candidate records", records.len());

    let enricher = DetailEnricher::new()?;

    for mut record in records {
        // Best-effort: a detail fetch failure only shows up in the counters,
        // never drops the record.
        match enricher.enrich(fetcher, &mut record).await {
            EnrichOutcome::Filled => outcome.enriched += 1,
            EnrichOutcome::FetchFailed => outcome.detail_failures += 1,
            EnrichOutcome::Absent => {}
        }

        if let Err(reason) = check_eligibility(&record, &config.filter.escolaridades) {
            log::debug!("Dropped {}: {}", record.titulo, reason);
            outcome.dropped_ineligible += 1;
            continue;
        }

        // Admission must precede notification: a send failure after this
        // point is final for the announcement.
        if !store.admit(&record) {
            let reason = DropReason::Duplicate {
                titulo: record.titulo.clone(),
            };
            log::debug!("Dropped record: {}", reason);
            outcome.dropped_duplicate += 1;
            continue;
        }
        outcome.admitted += 1;

        if notifier.notify(&record).await {
            outcome.notified += 1;
        }
    }

    store.flush()?;

    outcome.finished_at = Utc::now();
    log_summary(&outcome);
    Ok(outcome)
}

fn log_summary(outcome: &RunOutcome) {
    log::info!(
        "Run complete: {} extracted, {} enriched, {} ineligible, {} duplicate, {} admitted, {} notified",
        outcome.extracted,
        outcome.enriched,
        outcome.dropped_ineligible,
        outcome.dropped_duplicate,
        outcome.admitted,
        outcome.notified,
    );
}
