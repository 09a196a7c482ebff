// src/services/mod.rs

//! Service layer for the watcher application.
//!
//! This module contains the business logic for:
//! - Field normalization (`fields`)
//! - Listing extraction (`ListingExtractor`)
//! - Detail enrichment (`DetailEnricher`)
//! - Page fetching (`PageFetcher` / `HttpFetcher`)
//! - Notification dispatch (`Notifier` / `CallMeBotNotifier`)

pub mod fields;

mod detail;
mod fetch;
mod listing;
mod notify;

pub use detail::{DetailEnricher, EnrichOutcome};
pub use fetch::{HttpFetcher, PageFetcher};
pub use listing::ListingExtractor;
pub use notify::{CallMeBotNotifier, DryRunNotifier, Notifier, format_message};
