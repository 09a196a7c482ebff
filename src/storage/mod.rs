// src/storage/mod.rs

//! Persistent dedup store.
//!
//! A mapping from announcement id to a [`SeenEntry`] snapshot, kept in
//! memory during a run and flushed to a pretty-printed UTF-8 JSON file at
//! orderly shutdown. The on-disk schema
//! `{ "<id>": { "titulo": .., "estado": .. } }` is read by an external
//! reporting utility and must stay stable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ConcursoRecord, SeenEntry};

/// Persistent set of previously processed announcement ids.
///
/// Loaded once at pipeline start, mutated in memory by [`admit`], flushed
/// once at shutdown. A crash between admission and flush loses those
/// admissions; the next run re-admits them.
///
/// [`admit`]: SeenStore::admit
pub struct SeenStore {
    path: PathBuf,
    seen: BTreeMap<String, SeenEntry>,
}

impl SeenStore {
    /// Load the store from disk.
    ///
    /// A missing file or malformed content yields an empty store, never an
    /// error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let seen = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(seen) => seen,
                Err(e) => {
                    log::warn!(
                        "Seen file {} is malformed ({}), starting empty",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        log::info!("Loaded {} seen concursos from {}", seen.len(), path.display());
        Self { path, seen }
    }

    /// Admit a record if its id has not been seen.
    ///
    /// Returns false for a duplicate; the caller must drop the record.
    /// Durable only after [`flush`](SeenStore::flush).
    pub fn admit(&mut self, record: &ConcursoRecord) -> bool {
        if self.seen.contains_key(&record.id) {
            return false;
        }
        self.seen.insert(record.id.clone(), SeenEntry::from(record));
        true
    }

    /// Whether an id has been admitted.
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains_key(id)
    }

    /// Number of admitted announcements.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole mapping to disk, atomically replacing the previous
    /// contents (write to a temp file, then rename).
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.seen)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        log::info!("Saved {} seen concursos to {}", self.seen.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id_suffix: &str) -> ConcursoRecord {
        ConcursoRecord {
            id: format!("id-{id_suffix}"),
            titulo: format!("Concurso {id_suffix}"),
            estado: "PE".to_string(),
            vagas: String::new(),
            salario: String::new(),
            escolaridade: "Superior".to_string(),
            cargos: String::new(),
            prazo_inscricao: String::new(),
            url: String::new(),
            url_edital: String::new(),
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::load(dir.path().join("seen.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SeenStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_admit_once_per_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SeenStore::load(dir.path().join("seen.json"));
        assert!(store.admit(&record("1")));
        assert!(!store.admit(&record("1")));
        assert!(store.admit(&record("2")));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_flush_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("seen.json");

        let mut store = SeenStore::load(&path);
        store.admit(&record("1"));
        store.admit(&record("2"));
        store.flush().unwrap();

        let reloaded = SeenStore::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("id-1"));
        assert!(reloaded.contains("id-2"));
        assert_eq!(reloaded.seen, store.seen);
    }

    #[test]
    fn test_flush_schema_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");

        let mut store = SeenStore::load(&path);
        store.admit(&record("1"));
        store.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["id-1"]["titulo"], "Concurso 1");
        assert_eq!(value["id-1"]["estado"], "PE");
        // Pretty-printed for the human/reporting consumer.
        assert!(content.contains('\n'));
    }

    #[test]
    fn test_flush_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, r#"{"stale": {"titulo": "Old", "estado": "XX"}}"#).unwrap();

        let mut store = SeenStore::load(&path);
        assert_eq!(store.len(), 1);
        store.admit(&record("1"));
        store.flush().unwrap();

        let reloaded = SeenStore::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("stale"));
        assert!(reloaded.contains("id-1"));
    }
}
