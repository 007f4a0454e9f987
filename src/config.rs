// File: ./src/config.rs
// Vocabulary and naming rules for reading scraped schedule stores.
//
// Everything that used to be a module-level constant in the scraper (file
// naming, term codes, course-key pattern, header vocabulary) lives here and is
// handed to the reader and the views explicitly, so two schools with different
// conventions can be loaded side by side.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const TERM_PLACEHOLDER: &str = "{term}";

fn default_store_template() -> String {
    format!("{}_database.json", TERM_PLACEHOLDER)
}

fn default_schools() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("1".to_string(), "FH".to_string()),
        ("2".to_string(), "DA".to_string()),
    ])
}

fn default_ignored_tables() -> Vec<String> {
    vec!["_default".to_string()]
}

fn default_unscheduled_markers() -> Vec<String> {
    ["TBA", "ONLINE", "ARR", "ARRANGED"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_status_open() -> Vec<String> {
    vec!["Open".to_string()]
}
fn default_status_waitlist() -> Vec<String> {
    vec!["Waitlist".to_string(), "WL".to_string()]
}
fn default_status_closed() -> Vec<String> {
    vec!["Closed".to_string(), "Full".to_string()]
}

fn default_time_formats() -> Vec<String> {
    ["%I:%M %p", "%I:%M%p", "%H:%M"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_date_formats() -> Vec<String> {
    ["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_resource_template() -> String {
    "/{quarter}/{department}/{course}/{crn}".to_string()
}

/// Shape of a raw course token such as `F001A02Y`:
/// format letter, zero-padded number, optional letter suffix, optional
/// section digits, optional qualifier letter.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CourseKeyGrammar {
    pub format_letters: String,
    pub number_digits: usize,
    pub qualifiers: String,
}

impl Default for CourseKeyGrammar {
    fn default() -> Self {
        Self {
            format_letters: "FD".to_string(),
            number_digits: 3,
            qualifiers: "YWH".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ModelConfig {
    #[serde(default = "default_store_template")]
    pub store_template: String,
    /// Term-code suffix -> school label.
    #[serde(default = "default_schools")]
    pub schools: BTreeMap<String, String>,
    #[serde(default = "default_ignored_tables")]
    pub ignored_tables: Vec<String>,
    #[serde(default)]
    pub course_key: CourseKeyGrammar,
    #[serde(default = "default_unscheduled_markers")]
    pub unscheduled_markers: Vec<String>,

    #[serde(default = "default_status_open")]
    pub status_open: Vec<String>,
    #[serde(default = "default_status_waitlist")]
    pub status_waitlist: Vec<String>,
    #[serde(default = "default_status_closed")]
    pub status_closed: Vec<String>,

    #[serde(default = "default_time_formats")]
    pub time_formats: Vec<String>,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,

    #[serde(default = "default_resource_template")]
    pub resource_template: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            store_template: default_store_template(),
            schools: default_schools(),
            ignored_tables: default_ignored_tables(),
            course_key: CourseKeyGrammar::default(),
            unscheduled_markers: default_unscheduled_markers(),
            status_open: default_status_open(),
            status_waitlist: default_status_waitlist(),
            status_closed: default_status_closed(),
            time_formats: default_time_formats(),
            date_formats: default_date_formats(),
            resource_template: default_resource_template(),
        }
    }
}

impl ModelConfig {
    /// Load a configuration from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// File name of the store for `term`.
    pub fn store_file_name(&self, term: &str) -> String {
        self.store_template.replace(TERM_PLACEHOLDER, term)
    }

    /// Inverse of `store_file_name`: the term identifier of a matching file name.
    pub fn term_from_file_name(&self, file_name: &str) -> Option<String> {
        let (prefix, suffix) = self.store_template.split_once(TERM_PLACEHOLDER)?;
        let term = file_name.strip_prefix(prefix)?.strip_suffix(suffix)?;
        if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        }
    }

    /// School label of a term. Legacy stores are named after the school itself
    /// (`fh_database.json`); numeric term codes carry the school in their suffix.
    pub fn school_for_term(&self, term: &str) -> Option<String> {
        if let Some(label) = self
            .schools
            .values()
            .find(|label| label.eq_ignore_ascii_case(term))
        {
            return Some(label.clone());
        }
        // Longest suffix first so "11" can override "1" if both are configured.
        let mut suffixes: Vec<&String> = self.schools.keys().collect();
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));
        suffixes
            .into_iter()
            .find(|suffix| term.ends_with(suffix.as_str()))
            .and_then(|suffix| self.schools.get(suffix))
            .cloned()
    }

    pub fn is_ignored_table(&self, table: &str) -> bool {
        self.ignored_tables.iter().any(|t| t == table)
    }

    /// True when a days/time/room token carries no concrete value.
    pub fn is_unscheduled(&self, token: &str) -> bool {
        let token = token.trim();
        token.is_empty()
            || self
                .unscheduled_markers
                .iter()
                .any(|m| m.eq_ignore_ascii_case(token))
    }

    pub fn resource_url(&self, quarter: &str, department: &str, course: &str, crn: &str) -> String {
        self.resource_template
            .replace("{quarter}", quarter)
            .replace("{department}", department)
            .replace("{course}", course)
            .replace("{crn}", crn)
    }
}
