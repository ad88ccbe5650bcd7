mod record;

pub use record::{
    EnvironmentalImpact, HazardLevel, HazardRecord, ImpactLevel, ImpactProfile,
};

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lexicon data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("hazard record at position {position} has a blank id")]
    BlankId { position: usize },
    #[error("duplicate hazard record id '{id}'")]
    DuplicateId { id: String },
    #[error("alias '{alias}' points at unknown record id '{id}'")]
    DanglingAlias { alias: String, id: String },
}

/// Read-only index over the curated hazard lexicon.
///
/// Built once at start-up and shared behind `Arc` afterwards; it is never
/// mutated, so concurrent lookups need no synchronization. All schema
/// problems are rejected here so that every later lookup either returns a
/// complete record or nothing.
#[derive(Debug)]
pub struct LexiconStore {
    records: HashMap<String, HazardRecord>,
    alias_to_id: HashMap<String, String>,
    aliases: Vec<String>,
}

impl LexiconStore {
    /// Loads the alias index and hazard records from their JSON files.
    pub fn load<P: AsRef<Path>>(alias_path: P, hazard_path: P) -> Result<Self, LoadError> {
        let alias_file = std::fs::File::open(alias_path)?;
        let hazard_file = std::fs::File::open(hazard_path)?;
        Self::from_readers(alias_file, hazard_file)
    }

    pub fn from_readers<A: Read, H: Read>(aliases: A, hazards: H) -> Result<Self, LoadError> {
        let alias_map: HashMap<String, String> = serde_json::from_reader(aliases)?;
        let records: Vec<HazardRecord> = serde_json::from_reader(hazards)?;
        Self::from_parts(alias_map, records)
    }

    /// Builds a store from already-parsed data, enforcing the lexicon
    /// invariants: non-blank unique ids and no alias without a target.
    pub fn from_parts(
        alias_map: HashMap<String, String>,
        records: Vec<HazardRecord>,
    ) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(LoadError::BlankId { position });
            }
            let id = record.id.clone();
            if by_id.insert(id.clone(), record).is_some() {
                return Err(LoadError::DuplicateId { id });
            }
        }

        for (alias, id) in &alias_map {
            if !by_id.contains_key(id) {
                return Err(LoadError::DanglingAlias {
                    alias: alias.clone(),
                    id: id.clone(),
                });
            }
        }

        // Sorted order keeps fuzzy candidate scans (and their tie-breaks)
        // deterministic across runs.
        let mut aliases: Vec<String> = alias_map.keys().cloned().collect();
        aliases.sort();

        Ok(Self {
            records: by_id,
            alias_to_id: alias_map,
            aliases,
        })
    }

    pub fn record(&self, id: &str) -> Option<&HazardRecord> {
        self.records.get(id)
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.alias_to_id.get(alias).map(String::as_str)
    }

    /// All alias keys in a stable sorted order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}
