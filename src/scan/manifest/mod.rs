//! Build manifest readers.
//!
//! A project declares its dependencies in one build manifest. Each supported
//! build tool implements `BuildManifest`:
//!
//! ```text
//! BuildManifest trait
//!     ├── MavenManifest   (pom.xml)
//!     └── GradleManifest  (build.gradle, build.gradle.kts)
//! ```
//!
//! A missing or malformed manifest is never an error: it simply yields no
//! dependencies.

use std::fmt;
use std::path::Path;

mod gradle;
mod maven;

pub use gradle::GradleManifest;
pub use maven::MavenManifest;

use super::patterns::STARTER_MARKER;
use super::{read_lossy, DependencyInfo};

/// Build tool that owns a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestType {
    Maven,
    Gradle,
}

impl fmt::Display for ManifestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestType::Maven => write!(f, "maven"),
            ManifestType::Gradle => write!(f, "gradle"),
        }
    }
}

/// A build manifest loaded from a project root.
pub trait BuildManifest: Send + Sync {
    fn manifest_type(&self) -> ManifestType;

    fn path(&self) -> &Path;

    /// Raw manifest text.
    fn content(&self) -> &str;

    /// Declared dependency coordinates, in file order.
    fn dependencies(&self) -> Vec<DependencyInfo>;

    /// Whether the manifest pulls in a framework starter.
    fn has_framework_starter(&self) -> bool {
        self.content().contains(STARTER_MARKER)
    }
}

/// Load the project's build manifest. `pom.xml` wins over Gradle files.
pub fn detect_manifest(root: &Path) -> Option<Box<dyn BuildManifest>> {
    if let Some(maven) = MavenManifest::from_root(root) {
        return Some(Box::new(maven));
    }
    if let Some(gradle) = GradleManifest::from_root(root) {
        return Some(Box::new(gradle));
    }
    tracing::debug!(root = %root.display(), "no build manifest");
    None
}

/// Read a manifest file, treating an unreadable file as absent.
fn read_manifest(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match read_lossy(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "using build manifest");
            Some(content)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable build manifest");
            None
        }
    }
}
