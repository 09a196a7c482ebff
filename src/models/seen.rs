// src/models/seen.rs

//! Seen-announcement projection persisted by the dedup store.

use serde::{Deserialize, Serialize};

use super::ConcursoRecord;

/// Snapshot captured at admission time.
///
/// Intentionally a partial projection: enough for auditing and for the
/// external read-only report, not a full record cache. The on-disk schema
/// `{ "<id>": { "titulo": .., "estado": .. } }` is stable for that consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeenEntry {
    /// Announcement title
    pub titulo: String,

    /// Region code
    pub estado: String,
}

impl From<&ConcursoRecord> for SeenEntry {
    fn from(record: &ConcursoRecord) -> Self {
        Self {
            titulo: record.titulo.clone(),
            estado: record.estado.clone(),
        }
    }
}
