// File: src/paths.rs
use anyhow::Result;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Overrides the store root, mainly for tests and deployments with a fixed layout.
pub const STORE_ROOT_ENV: &str = "OWL_DB_ROOT";

pub struct StorePaths;

impl StorePaths {
    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "owl", "owl")
    }

    /// Directory the crawler writes its per-term stores into.
    ///
    /// `OWL_DB_ROOT` wins; otherwise `<platform data dir>/db`. Unlike the
    /// crawler, this never creates the directory: a missing root is reported
    /// by `DataModel::new`.
    pub fn default_store_root() -> Result<PathBuf> {
        if let Ok(root) = env::var(STORE_ROOT_ENV)
            && !root.trim().is_empty()
        {
            return Ok(PathBuf::from(root));
        }
        let proj = Self::get_proj_dirs()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(proj.data_dir().join("db"))
    }
}
