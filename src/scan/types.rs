//! Result records produced by the heuristic scans.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A network endpoint declared by a handler method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    /// Verb token of the mapping marker: `GET`, `POST`, `PUT` or `DELETE`.
    pub http_method: String,
    pub path: String,
    pub controller_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub name: String,
    /// Empty when the entity does not name its table.
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInfo {
    pub group_id: String,
    pub artifact_id: String,
    /// Empty when the manifest leaves the version to a parent or BOM.
    pub version: String,
}

impl DependencyInfo {
    pub fn new(group_id: &str, artifact_id: &str, version: Option<&str>) -> Self {
        Self {
            group_id: group_id.trim().to_string(),
            artifact_id: artifact_id.trim().to_string(),
            version: version.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    /// `group:artifact[:version]`
    pub fn coordinates(&self) -> String {
        if self.version.is_empty() {
            format!("{}:{}", self.group_id, self.artifact_id)
        } else {
            format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
        }
    }
}

/// Whether the project passed framework detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Supported,
    Unsupported,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Supported => "supported",
            ProjectKind::Unsupported => "unsupported",
        }
    }
}

/// Full analysis of one project. This is the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub project_name: String,
    pub kind: ProjectKind,
    pub analyzed_at: DateTime<Utc>,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub endpoints: Vec<ApiEndpoint>,
    #[serde(default)]
    pub entities: Vec<EntityInfo>,
    #[serde(default)]
    pub dependencies: Vec<DependencyInfo>,
    /// Flat key/value configuration in file order.
    #[serde(default)]
    pub configuration: IndexMap<String, String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub error: String,
}

impl AnalysisResult {
    /// An empty result stamped with the current time.
    pub fn new(project_name: &str, kind: ProjectKind) -> Self {
        Self {
            project_name: project_name.to_string(),
            kind,
            analyzed_at: Utc::now(),
            project_url: String::new(),
            endpoints: Vec::new(),
            entities: Vec::new(),
            dependencies: Vec::new(),
            configuration: IndexMap::new(),
            summary: String::new(),
            error: String::new(),
        }
    }

    /// A result for a project that failed detection. Nothing else is scanned.
    pub fn unsupported(project_name: &str, message: &str) -> Self {
        Self {
            error: message.to_string(),
            ..Self::new(project_name, ProjectKind::Unsupported)
        }
    }

    pub fn is_supported(&self) -> bool {
        self.kind == ProjectKind::Supported
    }

    /// Distinct controller names among the endpoints.
    pub fn controller_count(&self) -> usize {
        let mut names: Vec<&str> = self
            .endpoints
            .iter()
            .map(|e| e.controller_name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// One-line description, e.g. `3 endpoints across 1 controller, 2 entities, 4 dependencies`.
    pub fn describe(&self) -> String {
        let controllers = self.controller_count();
        format!(
            "{} across {} {}, {}, {}",
            plural(self.endpoints.len(), "endpoint"),
            controllers,
            if controllers == 1 { "controller" } else { "controllers" },
            plural(self.entities.len(), "entity"),
            plural(self.dependencies.len(), "dependency"),
        )
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else if let Some(stem) = word.strip_suffix('y') {
        format!("{} {}ies", n, stem)
    } else {
        format!("{} {}s", n, word)
    }
}
