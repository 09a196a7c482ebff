// src/models/mod.rs

//! Domain models for the watcher application.

mod concurso;
mod seen;

// Re-export all public types
pub use concurso::ConcursoRecord;
pub use seen::SeenEntry;
