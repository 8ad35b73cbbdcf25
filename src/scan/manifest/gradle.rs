//! Gradle build script reader (Groovy and Kotlin DSL).

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use super::{read_manifest, BuildManifest, ManifestType};
use crate::scan::DependencyInfo;

/// Build script names, in lookup order.
const BUILD_SCRIPTS: &[&str] = &["build.gradle", "build.gradle.kts"];

lazy_static! {
    /// `implementation 'g:a:v'` or `implementation("g:a")`.
    static ref DEPENDENCY_LINE: Regex = Regex::new(
        r#"(?m)^\s*(?:implementation|api|compileOnly|runtimeOnly|testImplementation|annotationProcessor)\s*\(?\s*['"]([^:'"\s]+):([^:'"\s]+)(?::([^'"\s]+))?['"]"#
    ).unwrap();
}

pub struct GradleManifest {
    path: PathBuf,
    content: String,
}

impl GradleManifest {
    pub fn from_root(root: &Path) -> Option<Self> {
        BUILD_SCRIPTS.iter().find_map(|name| {
            let path = root.join(name);
            read_manifest(&path).map(|content| Self { path, content })
        })
    }

    pub fn from_content(content: &str) -> Self {
        Self {
            path: PathBuf::from("build.gradle"),
            content: content.to_string(),
        }
    }
}

pub fn parse_dependencies(content: &str) -> Vec<DependencyInfo> {
    DEPENDENCY_LINE
        .captures_iter(content)
        .map(|c| DependencyInfo::new(&c[1], &c[2], c.get(3).map(|m| m.as_str())))
        .collect()
}

impl BuildManifest for GradleManifest {
    fn manifest_type(&self) -> ManifestType {
        ManifestType::Gradle
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn dependencies(&self) -> Vec<DependencyInfo> {
        parse_dependencies(&self.content)
    }
}
