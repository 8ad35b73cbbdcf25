//! Line-oriented heuristic scans over raw file text.
//!
//! Nothing here builds a syntax tree, so files that do not parse still
//! contribute whatever their lines reveal. Each scan is a pure function of
//! one file's text; the runner decides which files to feed it.
//!
//! - `endpoints`: handler mappings in network-facing controllers
//! - `entities`: persistent-entity declarations
//! - `manifest`: dependency coordinates from the build manifest
//! - `properties`: flat runtime configuration and the derived project URL

use std::io;
use std::path::Path;

mod endpoints;
mod entities;
pub mod manifest;
mod patterns;
mod properties;
mod types;

pub use endpoints::{normalize_path, scan_endpoints};
pub use entities::scan_entity;
pub use manifest::{detect_manifest, BuildManifest, ManifestType};
pub use patterns::extract_literal;
pub use properties::{
    derive_project_url, find_configuration, parse_configuration, read_configuration, ConfigFormat,
};
pub use types::{AnalysisResult, ApiEndpoint, DependencyInfo, EntityInfo, ProjectKind};

/// Read a file as text, replacing bytes that are not UTF-8.
///
/// Build files and `application.properties` are often Latin-1; a stray byte
/// must not hide the rest of the file.
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether source text contains an application entry marker.
pub fn has_application_entry(text: &str) -> bool {
    patterns::APPLICATION_ENTRY.is_match(text)
}

/// Everything the line scans find in one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFacts {
    pub endpoints: Vec<ApiEndpoint>,
    pub entity: Option<EntityInfo>,
}

/// Run the endpoint and entity scans over one source file.
pub fn scan_source(text: &str, fallback_name: &str) -> SourceFacts {
    SourceFacts {
        endpoints: scan_endpoints(text),
        entity: scan_entity(text, fallback_name),
    }
}
