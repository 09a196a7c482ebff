// src/services/detail.rs

//! Detail page enricher.
//!
//! Best-effort: fills `url_edital` from a record's own detail page. A fetch
//! failure never drops the record.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::ConcursoRecord;
use crate::services::PageFetcher;
use crate::utils;

/// Outcome of a best-effort enrichment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// `url_edital` was filled from the detail page
    Filled,
    /// Detail page fetched but no supplementary link present, or the record
    /// had no detail link to follow
    Absent,
    /// Detail page could not be fetched; record kept unchanged
    FetchFailed,
}

/// Finds the supplementary-document link on a detail page.
pub struct DetailEnricher {
    edital_sel: Selector,
}

impl DetailEnricher {
    /// Create an enricher with the source-site selector.
    pub fn new() -> Result<Self> {
        let selector = "li.pdf a";
        let edital_sel =
            Selector::parse(selector).map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        Ok(Self { edital_sel })
    }

    /// Find the first supplementary-document link in a detail page, resolved
    /// against the page URL. First in document order wins.
    pub fn find_edital(&self, document: &Html, base_url: &str) -> Option<String> {
        document
            .select(&self.edital_sel)
            .find_map(|el| el.value().attr("href"))
            .map(|href| utils::resolve(base_url, href).unwrap_or_else(|| href.to_string()))
    }

    /// Fetch the record's detail page and fill `url_edital` if a
    /// supplementary link is present.
    ///
    /// Fetch failures are logged and leave the record unchanged; enrichment
    /// is never required for downstream stages.
    pub async fn enrich(
        &self,
        fetcher: &dyn PageFetcher,
        record: &mut ConcursoRecord,
    ) -> EnrichOutcome {
        if record.url.is_empty() || !record.url_edital.is_empty() {
            return EnrichOutcome::Absent;
        }

        let html = match fetcher.fetch(&record.url).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Detail fetch failed for {}: {}", record.url, e);
                return EnrichOutcome::FetchFailed;
            }
        };

        let document = Html::parse_document(&html);
        match self.find_edital(&document, &record.url) {
            Some(link) => {
                record.url_edital = link;
                EnrichOutcome::Filled
            }
            None => EnrichOutcome::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_edital_first_link_wins() {
        let html = r#"
            <ul>
              <li class="pdf"><a href="/edital-1.pdf">Edital</a></li>
              <li class="pdf"><a href="/edital-2.pdf">Retificação</a></li>
            </ul>"#;
        let document = Html::parse_document(html);
        let enricher = DetailEnricher::new().unwrap();
        assert_eq!(
            enricher.find_edital(&document, "https://x.test/c/1"),
            Some("https://x.test/edital-1.pdf".to_string())
        );
    }

    #[test]
    fn test_find_edital_absent() {
        let document = Html::parse_document("<ul><li><a href='/x'>Outro</a></li></ul>");
        let enricher = DetailEnricher::new().unwrap();
        assert_eq!(enricher.find_edital(&document, "https://x.test/c/1"), None);
    }

    #[test]
    fn test_find_edital_keeps_absolute_links() {
        let html = r#"<li class="pdf"><a href="https://cdn.test/edital.pdf">Edital</a></li>"#;
        let document = Html::parse_document(html);
        let enricher = DetailEnricher::new().unwrap();
        assert_eq!(
            enricher.find_edital(&document, "https://x.test/c/1"),
            Some("https://cdn.test/edital.pdf".to_string())
        );
    }
}
