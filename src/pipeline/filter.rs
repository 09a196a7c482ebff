// src/pipeline/filter.rs

//! Eligibility filter and drop reasons.
//!
//! Rejections are normal filtered-out outcomes, reported as an explicit drop
//! signal and logged at low severity, never as errors.

use std::fmt;

use crate::models::ConcursoRecord;

/// Why a record was dropped by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Schooling level matched none of the accepted levels
    Ineligible { escolaridade: String },

    /// Identifier already admitted in a previous run or earlier in this one
    Duplicate { titulo: String },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Ineligible { escolaridade } => {
                write!(f, "escolaridade não aceita: {escolaridade:?}")
            }
            DropReason::Duplicate { titulo } => write!(f, "já visto: {titulo}"),
        }
    }
}

/// Accept a record iff its schooling level contains at least one accepted
/// level as a substring.
///
/// Substring containment, not equality: the source text often appends
/// qualifiers ("Superior completo"). An empty level means unknown and fails.
pub fn check_eligibility(
    record: &ConcursoRecord,
    accepted: &[String],
) -> std::result::Result<(), DropReason> {
    if accepted
        .iter()
        .any(|level| record.escolaridade.contains(level.as_str()))
    {
        Ok(())
    } else {
        Err(DropReason::Ineligible {
            escolaridade: record.escolaridade.clone(),
        })
    }
}
