// File: ./src/model/department.rs
use crate::config::ModelConfig;
use crate::error::{LookupKind, ModelError, Result};
use crate::model::course::CourseQuarterView;
use crate::model::section::SectionQuarterView;
use crate::storage::RawDepartment;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
pub struct DepartmentQuarterView {
    name: String,
    quarter: String,
    raw: Arc<RawDepartment>,
    config: Arc<ModelConfig>,
    courses: OnceLock<BTreeMap<String, CourseQuarterView>>,
}

impl DepartmentQuarterView {
    pub fn new(
        quarter: &str,
        name: &str,
        raw: Arc<RawDepartment>,
        config: Arc<ModelConfig>,
    ) -> Self {
        Self {
            name: name.to_string(),
            quarter: quarter.to_string(),
            raw,
            config,
            courses: OnceLock::new(),
        }
    }

    /// Department code, e.g. `ACTG`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn courses(&self) -> &BTreeMap<String, CourseQuarterView> {
        self.courses.get_or_init(|| {
            self.raw
                .courses
                .iter()
                .map(|(key, raw)| {
                    let view = CourseQuarterView::new(
                        &self.quarter,
                        &self.name,
                        key,
                        Arc::clone(raw),
                        Arc::clone(&self.config),
                    );
                    (key.clone(), view)
                })
                .collect()
        })
    }

    pub fn course(&self, key: &str) -> Result<&CourseQuarterView> {
        self.courses()
            .get(key)
            .ok_or_else(|| ModelError::lookup(LookupKind::Course, key))
    }

    /// Every section of every course in this department.
    pub fn sections(&self) -> impl Iterator<Item = &SectionQuarterView> {
        self.courses().values().flat_map(|c| c.sections().values())
    }
}

impl PartialEq for DepartmentQuarterView {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.quarter == other.quarter
            && self.courses() == other.courses()
    }
}
