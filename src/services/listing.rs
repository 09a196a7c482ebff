// src/services/listing.rs

//! Listing page extractor.
//!
//! Walks the top-level entry elements of the regional listing page once, in
//! document order, carrying the current region set by the most recent region
//! header. Announcement entries inherit that region when they carry no local
//! region field; the grouping is visual on the source page, so reordering the
//! input changes the output by design.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::ConcursoRecord;
use crate::services::fields;

/// Sentinel region set by a header flagged as region-wide rather than
/// carrying a state code.
pub const NATIONWIDE: &str = "NORDESTE";

/// Extracts candidate records from the listing document.
pub struct ListingExtractor {
    entry_sel: Selector,
    header_label_sel: Selector,
    region_sel: Selector,
    title_sel: Selector,
    fields_sel: Selector,
    fields_span_sel: Selector,
    deadline_sel: Selector,
}

impl ListingExtractor {
    /// Create an extractor with the source-site selectors.
    pub fn new() -> Result<Self> {
        Ok(Self {
            entry_sel: Self::parse_selector("div#concursos > div")?,
            header_label_sel: Self::parse_selector("div.uf")?,
            region_sel: Self::parse_selector("div.cc")?,
            title_sel: Self::parse_selector("div.ca a")?,
            fields_sel: Self::parse_selector("div.cd")?,
            fields_span_sel: Self::parse_selector("div.cd span")?,
            deadline_sel: Self::parse_selector("div.ce span")?,
        })
    }

    /// Walk the listing document and produce candidate records.
    ///
    /// Entries whose resolved region is outside `estados` are discarded
    /// silently; elements matching neither a header nor an entry shape are
    /// ignored. Returned records always have `url_edital` empty.
    pub fn extract(&self, document: &Html, estados: &[String]) -> Vec<ConcursoRecord> {
        let mut current_region: Option<String> = None;
        let mut records = Vec::new();

        for element in document.select(&self.entry_sel) {
            let class = element.value().attr("class").unwrap_or("");

            // Region header: explicit code in its id, or a region-wide label.
            if class.split_whitespace().any(|c| c == "ua") {
                if let Some(region) = self.parse_header(&element) {
                    current_region = Some(region);
                }
                continue;
            }

            // Announcement entry: one of the two recognized variants.
            if class.trim() != "na" && class.trim() != "da" {
                continue;
            }

            let estado = match self.resolve_region(&element, current_region.as_deref()) {
                Some(estado) => estado,
                None => continue,
            };
            if !estados.iter().any(|e| e == &estado) {
                log::debug!("Skipping entry outside accepted regions: {}", estado);
                continue;
            }

            if let Some(record) = self.parse_entry(&element, estado) {
                records.push(record);
            }
        }

        records
    }

    /// Determine the region a header establishes, if any.
    fn parse_header(&self, element: &ElementRef) -> Option<String> {
        let id = element.value().attr("id").unwrap_or("");
        if !id.is_empty() {
            return Some(id.to_string());
        }

        let label: String = element
            .select(&self.header_label_sel)
            .next()
            .map(|el| el.text().collect())
            .unwrap_or_default();
        if label.contains(NATIONWIDE) {
            return Some(NATIONWIDE.to_string());
        }
        None
    }

    /// Resolve an entry's region from its local field or the current header.
    fn resolve_region(&self, element: &ElementRef, current: Option<&str>) -> Option<String> {
        let local: String = element
            .select(&self.region_sel)
            .next()
            .map(|el| fields::collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();
        if !local.is_empty() {
            return Some(local);
        }
        current.map(|c| c.to_string())
    }

    /// Extract and normalize a single announcement entry.
    fn parse_entry(&self, element: &ElementRef, estado: String) -> Option<ConcursoRecord> {
        let titulo: String = element
            .select(&self.title_sel)
            .next()
            .map(|el| fields::collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();
        if titulo.is_empty() {
            return None;
        }

        let url = element.value().attr("data-url").unwrap_or("").to_string();

        // Combined vacancy/salary string is the first direct text node of the
        // fields block; the role list and schooling level sit in its spans.
        let vagas_salario = element
            .select(&self.fields_sel)
            .next()
            .and_then(|el| {
                el.children()
                    .filter_map(|node| node.value().as_text())
                    .map(|text| fields::collapse_whitespace(text))
                    .find(|text| !text.is_empty())
            })
            .unwrap_or_default();
        let (vagas, salario) = fields::split_vagas_salario(&vagas_salario);

        let span_texts: Vec<String> = element
            .select(&self.fields_span_sel)
            .map(|el| fields::collapse_whitespace(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();
        let (cargos, escolaridade) = fields::split_cargos_escolaridade(&span_texts);

        // The deadline is split across text nodes by inline markup; join them
        // in document order.
        let prazo_inscricao = element
            .select(&self.deadline_sel)
            .next()
            .map(|el| fields::join_fragments(el.text()))
            .unwrap_or_default();

        let id = ConcursoRecord::compute_id(&titulo, &estado, &url);

        Some(ConcursoRecord {
            id,
            titulo,
            estado,
            vagas,
            salario,
            escolaridade,
            cargos,
            prazo_inscricao,
            url,
            url_edital: String::new(),
        })
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
