// File: ./src/model/data.rs
// Root of the view tree: every store found under one directory.
use crate::config::ModelConfig;
use crate::error::{LookupKind, ModelError, Result};
use crate::model::quarter::QuarterView;
use crate::storage::RawStoreReader;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
pub struct DataModel {
    reader: RawStoreReader,
    config: Arc<ModelConfig>,
    /// Term id -> school label, as discovered on disk.
    discovered: BTreeMap<String, String>,
    /// Store files whose term maps to no configured school.
    unmapped: BTreeSet<String>,
    schools: BTreeSet<String>,
    quarters: OnceLock<BTreeMap<String, QuarterView>>,
}

impl DataModel {
    /// Scan `root` with the default vocabulary.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, ModelConfig::default())
    }

    /// Scan `root` for store files. The stores themselves are read on first
    /// access to `quarters()`.
    pub fn with_config(root: impl AsRef<Path>, config: ModelConfig) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ModelError::DirectoryNotFound(root.to_path_buf()));
        }
        let config = Arc::new(config);

        let mut discovered = BTreeMap::new();
        let mut unmapped = BTreeSet::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(term) = file_name.to_str().and_then(|n| config.term_from_file_name(n)) else {
                continue;
            };
            match config.school_for_term(&term) {
                Some(school) => {
                    discovered.insert(term, school);
                }
                None => {
                    log::warn!(
                        "Ignoring store {:?}: term '{}' does not map to a school",
                        entry.path(),
                        term
                    );
                    unmapped.insert(term);
                }
            }
        }

        let schools: BTreeSet<String> = discovered.values().cloned().collect();
        log::info!(
            "Found {} quarter stores under {:?} ({:?})",
            discovered.len(),
            root,
            schools
        );

        Ok(Self {
            reader: RawStoreReader::new(root, Arc::clone(&config)),
            config,
            discovered,
            unmapped,
            schools,
            quarters: OnceLock::new(),
        })
    }

    pub fn root(&self) -> &Path {
        self.reader.root()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Distinct school labels across all discovered stores.
    pub fn schools(&self) -> &BTreeSet<String> {
        &self.schools
    }

    /// Term ids found on disk, without reading any store.
    pub fn quarter_ids(&self) -> impl Iterator<Item = &str> {
        self.discovered.keys().map(String::as_str)
    }

    /// Term ids of store files that were found but left out because no
    /// configured school claims them.
    pub fn unmapped_terms(&self) -> impl Iterator<Item = &str> {
        self.unmapped.iter().map(String::as_str)
    }

    /// Quarters keyed by term id. A store that disappeared or does not parse
    /// is logged and left out; the others are still served.
    pub fn quarters(&self) -> &BTreeMap<String, QuarterView> {
        self.quarters.get_or_init(|| {
            let mut quarters = BTreeMap::new();
            for (term, school) in &self.discovered {
                match QuarterView::load(&self.reader, term, school, Arc::clone(&self.config)) {
                    Ok(quarter) => {
                        quarters.insert(term.clone(), quarter);
                    }
                    Err(e) => log::warn!("Skipping quarter {}: {}", term, e),
                }
            }
            quarters
        })
    }

    pub fn quarter(&self, id: &str) -> Result<&QuarterView> {
        self.quarters()
            .get(id)
            .ok_or_else(|| ModelError::lookup(LookupKind::Quarter, id))
    }

    pub fn quarters_for_school<'a>(
        &'a self,
        school: &'a str,
    ) -> impl Iterator<Item = &'a QuarterView> {
        self.quarters()
            .values()
            .filter(move |q| q.school().eq_ignore_ascii_case(school))
    }
}
