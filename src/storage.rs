// Reads the per-term document stores written by the crawler.
//
// Layout of a store (TinyDB-style JSON):
//
//   { "<DEPT>": { "<doc id>": { "<course key>": { "<CRN>": [ <record>, ... ] } } } }
//
// The reader is read-only and best-effort below the file level: a record that
// is not an object or whose course token fails the course-key grammar is
// logged and dropped, never failing its siblings. A single badly typed field
// only blanks that field.
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::model::parser::course_key_from_name;
use fs2::FileExt;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One scraped table row, exactly as the crawler stored it.
///
/// Missing fields deserialize as empty strings; interpretation happens in the
/// section view. A field of the wrong JSON type only blanks that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub course: String,
    #[serde(rename = "CRN", deserialize_with = "lenient_string")]
    pub crn: String,
    #[serde(deserialize_with = "lenient_string")]
    pub desc: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub days: String,
    #[serde(deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end: String,
    #[serde(deserialize_with = "lenient_string")]
    pub room: String,
    #[serde(deserialize_with = "lenient_string")]
    pub campus: String,
    #[serde(deserialize_with = "lenient_string")]
    pub units: String,
    #[serde(deserialize_with = "lenient_string")]
    pub instructor: String,
    #[serde(deserialize_with = "lenient_string")]
    pub seats: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wait_seats: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wait_cap: String,
}

/// Accept any scalar for a text field: null becomes empty, numbers and bools
/// keep their JSON spelling, nested values are blanked.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            log::debug!("non-scalar record field {}, using empty", other);
            String::new()
        }
    })
}

/// Distinct observations of one section, in first-seen order.
pub type RawSection = Arc<[RawRecord]>;

#[derive(Debug, Default, PartialEq)]
pub struct RawCourse {
    pub sections: BTreeMap<String, RawSection>,
}

#[derive(Debug, Default, PartialEq)]
pub struct RawDepartment {
    pub courses: BTreeMap<String, Arc<RawCourse>>,
}

#[derive(Debug, Default, PartialEq)]
pub struct RawTerm {
    pub term: String,
    pub departments: BTreeMap<String, Arc<RawDepartment>>,
}

impl RawTerm {
    pub fn section_count(&self) -> usize {
        self.departments
            .values()
            .flat_map(|d| d.courses.values())
            .map(|c| c.sections.len())
            .sum()
    }
}

type Grouped = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<RawRecord>>>>;

/// Department codes are keyed without internal whitespace ("C S" -> "CS").
pub fn normalize_department(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_uppercase()
}

#[derive(Debug)]
pub struct RawStoreReader {
    root: PathBuf,
    config: Arc<ModelConfig>,
}

impl RawStoreReader {
    pub fn new(root: impl Into<PathBuf>, config: Arc<ModelConfig>) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_path(&self, term: &str) -> PathBuf {
        self.root.join(self.config.store_file_name(term))
    }

    /// Read the store for `term`. Fails with `StoreNotFound` if its file is absent.
    pub fn read(&self, term: &str) -> Result<RawTerm> {
        let path = self.store_path(term);
        if !path.is_file() {
            return Err(ModelError::StoreNotFound {
                term: term.to_string(),
                path,
            });
        }
        let json = Self::read_shared(&path)?;
        let raw = self.parse_store(term, &json)?;
        log::debug!(
            "Read store {:?}: {} departments, {} sections",
            path,
            raw.departments.len(),
            raw.section_count()
        );
        Ok(raw)
    }

    /// Read the whole file under a shared lock so a crawler swapping the file
    /// in place cannot hand us half a document.
    fn read_shared(path: &Path) -> Result<String> {
        let mut file = fs::File::open(path)?;
        FileExt::lock_shared(&file)?;
        let mut json = String::new();
        let result = file.read_to_string(&mut json);
        FileExt::unlock(&file)?;
        result?;
        Ok(json)
    }

    /// Parse store contents. Exposed separately so callers holding the JSON
    /// in memory do not need a file.
    pub fn parse_store(&self, term: &str, json: &str) -> Result<RawTerm> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(tables) = value else {
            return Err(ModelError::malformed(
                format!("store '{}'", term),
                "top level is not an object",
            ));
        };

        let mut grouped: Grouped = BTreeMap::new();
        for (table, documents) in tables {
            if self.config.is_ignored_table(&table) {
                continue;
            }
            let department = normalize_department(&table);
            let Value::Object(documents) = documents else {
                log::warn!("{}: table '{}' is not an object, skipping", term, table);
                continue;
            };
            let courses = grouped.entry(department.clone()).or_default();
            for (doc_id, document) in documents {
                match document {
                    Value::Object(doc) => self.collect_document(&department, doc, courses),
                    _ => log::warn!(
                        "{}: document {} of '{}' is not an object, skipping",
                        term,
                        doc_id,
                        department
                    ),
                }
            }
        }

        Ok(Self::freeze(term, grouped))
    }

    fn collect_document(
        &self,
        department: &str,
        doc: Map<String, Value>,
        courses: &mut BTreeMap<String, BTreeMap<String, Vec<RawRecord>>>,
    ) {
        for (course_key, sections) in doc {
            let Value::Object(sections) = sections else {
                log::warn!("{} {}: course entry is not an object", department, course_key);
                continue;
            };
            let course = courses.entry(course_key.clone()).or_default();
            for (crn, records) in sections {
                let Value::Array(records) = records else {
                    log::warn!("{} {} {}: records are not a list", department, course_key, crn);
                    continue;
                };
                let kept = course.entry(crn.clone()).or_default();
                for record in records {
                    match self.accept_record(record) {
                        Ok(record) => {
                            // Repeated snapshots of the same row collapse into one.
                            if !kept.contains(&record) {
                                kept.push(record);
                            }
                        }
                        Err(e) => log::warn!("{} {} {}: {}", department, course_key, crn, e),
                    }
                }
            }
        }
    }

    fn accept_record(&self, value: Value) -> Result<RawRecord> {
        let record: RawRecord = serde_json::from_value(value)
            .map_err(|e| ModelError::malformed("record", e.to_string()))?;
        if course_key_from_name(&record.course, &self.config.course_key).is_none() {
            return Err(ModelError::malformed(
                "record",
                format!("course token '{}' does not match the course-key grammar", record.course),
            ));
        }
        Ok(record)
    }

    /// Drop empty sections/courses/departments and share the remaining tree.
    fn freeze(term: &str, grouped: Grouped) -> RawTerm {
        let departments = grouped
            .into_iter()
            .filter_map(|(dept, courses)| {
                let courses: BTreeMap<String, Arc<RawCourse>> = courses
                    .into_iter()
                    .filter_map(|(key, sections)| {
                        let sections: BTreeMap<String, RawSection> = sections
                            .into_iter()
                            .filter(|(_, records)| !records.is_empty())
                            .map(|(crn, records)| (crn, Arc::from(records)))
                            .collect();
                        (!sections.is_empty()).then(|| (key, Arc::new(RawCourse { sections })))
                    })
                    .collect();
                (!courses.is_empty()).then(|| (dept, Arc::new(RawDepartment { courses })))
            })
            .collect();
        RawTerm {
            term: term.to_string(),
            departments,
        }
    }
}
