// File: ./src/model/quarter.rs
// One academic term, backed by one store file.
use crate::config::ModelConfig;
use crate::error::{LookupKind, ModelError, Result};
use crate::model::department::DepartmentQuarterView;
use crate::model::duration::DateSpan;
use crate::model::section::{SectionQuarterView, SectionType};
use crate::storage::{RawStoreReader, RawTerm};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
pub struct QuarterView {
    id: String,
    school: String,
    raw: RawTerm,
    config: Arc<ModelConfig>,
    departments: OnceLock<BTreeMap<String, DepartmentQuarterView>>,
    urls: OnceLock<BTreeSet<String>>,
    primary_duration: OnceLock<Option<DateSpan>>,
}

impl QuarterView {
    /// Read the store for `id`. Fails with `StoreNotFound` when its file is gone.
    pub fn load(
        reader: &RawStoreReader,
        id: &str,
        school: &str,
        config: Arc<ModelConfig>,
    ) -> Result<Self> {
        let raw = reader.read(id)?;
        Ok(Self::from_raw(raw, school, config))
    }

    pub fn from_raw(raw: RawTerm, school: &str, config: Arc<ModelConfig>) -> Self {
        Self {
            id: raw.term.clone(),
            school: school.to_string(),
            raw,
            config,
            departments: OnceLock::new(),
            urls: OnceLock::new(),
            primary_duration: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// School label, e.g. `FH`.
    pub fn school(&self) -> &str {
        &self.school
    }

    pub fn departments(&self) -> &BTreeMap<String, DepartmentQuarterView> {
        self.departments.get_or_init(|| {
            self.raw
                .departments
                .iter()
                .map(|(name, raw)| {
                    let view = DepartmentQuarterView::new(
                        &self.id,
                        name,
                        Arc::clone(raw),
                        Arc::clone(&self.config),
                    );
                    (name.clone(), view)
                })
                .collect()
        })
    }

    pub fn department(&self, name: &str) -> Result<&DepartmentQuarterView> {
        self.departments()
            .get(name)
            .ok_or_else(|| ModelError::lookup(LookupKind::Department, name))
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionQuarterView> {
        self.departments().values().flat_map(|d| d.sections())
    }

    /// Distinct resource URLs of every section in the quarter.
    ///
    /// The first call walks (and thereby builds) the whole department/course/
    /// section tree; later calls return the cached set.
    pub fn urls(&self) -> &BTreeSet<String> {
        self.urls.get_or_init(|| {
            let urls: BTreeSet<String> = self.sections().map(|s| s.url()).collect();
            log::debug!("Quarter {}: indexed {} section urls", self.id, urls.len());
            urls
        })
    }

    /// Earliest start to latest end over sections with concrete dates.
    /// Fully online sections do not count, even when the feed dates them.
    pub fn primary_duration(&self) -> Option<DateSpan> {
        *self.primary_duration.get_or_init(|| {
            self.sections()
                .filter(|s| s.section_type() != SectionType::Online)
                .filter_map(|s| s.date_span())
                .reduce(DateSpan::union)
        })
    }
}

impl PartialEq for QuarterView {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.school == other.school
            && self.departments() == other.departments()
    }
}
