//! File-based store for analysis results.
//!
//! One record per project at `<root>/<project>/analysis.json`. Writes replace
//! the previous record; concurrent writers for the same project race and the
//! last completed write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AnalyzeError, Result};
use crate::scan::AnalysisResult;

const RESULT_FILE: &str = "analysis.json";

pub struct AnalysisStore {
    root: PathBuf,
}

impl AnalysisStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a project's record.
    pub fn result_path(&self, project_name: &str) -> Result<PathBuf> {
        validate_project_name(project_name)?;
        Ok(self.root.join(project_name).join(RESULT_FILE))
    }

    /// Persist a result as pretty-printed JSON, replacing any previous one.
    pub fn save(&self, result: &AnalysisResult) -> Result<PathBuf> {
        let path = self.result_path(&result.project_name)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| AnalyzeError::io(dir, e))?;
        }

        let json = serde_json::to_string_pretty(result)?;
        fs::write(&path, json).map_err(|e| AnalyzeError::io(&path, e))?;

        tracing::info!(project = %result.project_name, path = %path.display(), "saved analysis");
        Ok(path)
    }

    /// The last saved result, or `None` if the project was never analyzed.
    pub fn load(&self, project_name: &str) -> Result<Option<AnalysisResult>> {
        let path = self.result_path(project_name)?;

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AnalyzeError::io(&path, e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| AnalyzeError::StoredAnalysis { path, source })
    }
}

/// A project name must be one plain path component to be used as a key.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains('\0');

    if invalid {
        return Err(AnalyzeError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}
