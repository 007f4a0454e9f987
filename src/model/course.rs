// File: ./src/model/course.rs
use crate::config::ModelConfig;
use crate::error::{LookupKind, ModelError, Result};
use crate::model::section::SectionQuarterView;
use crate::storage::RawCourse;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// All sections of one catalog course (e.g. ACTG 1A) in one quarter.
#[derive(Debug)]
pub struct CourseQuarterView {
    key: String,
    quarter: String,
    department: String,
    raw: Arc<RawCourse>,
    config: Arc<ModelConfig>,
    sections: OnceLock<BTreeMap<String, SectionQuarterView>>,
}

impl CourseQuarterView {
    pub fn new(
        quarter: &str,
        department: &str,
        key: &str,
        raw: Arc<RawCourse>,
        config: Arc<ModelConfig>,
    ) -> Self {
        Self {
            key: key.to_string(),
            quarter: quarter.to_string(),
            department: department.to_string(),
            raw,
            config,
            sections: OnceLock::new(),
        }
    }

    /// Catalog key, e.g. `1A`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Sections keyed by CRN.
    pub fn sections(&self) -> &BTreeMap<String, SectionQuarterView> {
        self.sections.get_or_init(|| {
            self.raw
                .sections
                .iter()
                .map(|(crn, records)| {
                    let view = SectionQuarterView::new(
                        &self.quarter,
                        &self.department,
                        &self.key,
                        crn,
                        Arc::clone(records),
                        Arc::clone(&self.config),
                    );
                    (crn.clone(), view)
                })
                .collect()
        })
    }

    pub fn section(&self, crn: &str) -> Result<&SectionQuarterView> {
        self.sections()
            .get(crn)
            .ok_or_else(|| ModelError::lookup(LookupKind::Section, crn))
    }
}

impl PartialEq for CourseQuarterView {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.quarter == other.quarter
            && self.department == other.department
            && self.sections() == other.sections()
    }
}
