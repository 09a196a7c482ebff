// src/models/concurso.rs

//! Announcement data structure.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A public-service job announcement extracted from the listing page.
///
/// Absence is modeled as an empty string per field, never a missing key.
/// Once constructed the record is immutable except for `url_edital`, which
/// the detail enricher may set exactly once before the record reaches the
/// eligibility filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConcursoRecord {
    /// Stable identifier, derived from (titulo, estado, url)
    pub id: String,

    /// Announcement title
    pub titulo: String,

    /// Region code (e.g. "PE", or the nationwide sentinel)
    pub estado: String,

    /// Vacancy count as free text (numeric string or empty)
    pub vagas: String,

    /// Salary ceiling as free text (currency string or empty)
    pub salario: String,

    /// Schooling-level descriptor; empty means unknown
    pub escolaridade: String,

    /// Role/position list, optional
    pub cargos: String,

    /// Application deadline, locale-formatted free text
    pub prazo_inscricao: String,

    /// Canonical link to the announcement's detail page; may be empty
    pub url: String,

    /// Supplementary document link, filled by the detail enricher
    pub url_edital: String,
}

impl ConcursoRecord {
    /// Compute the stable identifier for an announcement.
    ///
    /// Deterministic across processes and runs: SHA-256 over
    /// `titulo:estado:url`, hex-encoded. Two records sharing these three
    /// fields are the same announcement even if other fields drift.
    pub fn compute_id(titulo: &str, estado: &str, url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(titulo.as_bytes());
        hasher.update(b":");
        hasher.update(estado.as_bytes());
        hasher.update(b":");
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ConcursoRecord {
        ConcursoRecord {
            id: ConcursoRecord::compute_id(
                "Prefeitura de Recife",
                "PE",
                "https://example.com/concurso/1",
            ),
            titulo: "Prefeitura de Recife".to_string(),
            estado: "PE".to_string(),
            vagas: "120".to_string(),
            salario: "R$ 5.500,00".to_string(),
            escolaridade: "Superior completo".to_string(),
            cargos: "Analista, Técnico".to_string(),
            prazo_inscricao: "até 15/03/2026".to_string(),
            url: "https://example.com/concurso/1".to_string(),
            url_edital: String::new(),
        }
    }

    #[test]
    fn test_id_is_deterministic() {
        let a = ConcursoRecord::compute_id("Prefeitura", "PE", "https://x.test/1");
        let b = ConcursoRecord::compute_id("Prefeitura", "PE", "https://x.test/1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_ignores_other_fields() {
        let record = sample_record();
        let mut edited = record.clone();
        edited.vagas = "999".to_string();
        edited.salario = String::new();
        assert_eq!(
            ConcursoRecord::compute_id(&record.titulo, &record.estado, &record.url),
            ConcursoRecord::compute_id(&edited.titulo, &edited.estado, &edited.url),
        );
    }

    #[test]
    fn test_id_differs_per_announcement() {
        let a = ConcursoRecord::compute_id("Prefeitura", "PE", "https://x.test/1");
        let b = ConcursoRecord::compute_id("Prefeitura", "PB", "https://x.test/1");
        let c = ConcursoRecord::compute_id("Prefeitura", "PE", "https://x.test/2");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_is_hex_sha256() {
        let id = ConcursoRecord::compute_id("t", "e", "u");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
