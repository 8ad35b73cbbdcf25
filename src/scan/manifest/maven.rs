//! Maven `pom.xml` reader.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use super::{read_manifest, BuildManifest, ManifestType};
use crate::scan::DependencyInfo;

lazy_static! {
    /// One `<dependency>` block with optional version. Matched over the
    /// whole text since a block spans several lines.
    static ref DEPENDENCY_BLOCK: Regex = Regex::new(
        r"(?s)<dependency>\s*<groupId>([^<]*)</groupId>\s*<artifactId>([^<]*)</artifactId>\s*(<version>([^<]*)</version>)?\s*</dependency>"
    ).unwrap();
}

pub struct MavenManifest {
    path: PathBuf,
    content: String,
}

impl MavenManifest {
    pub fn from_root(root: &Path) -> Option<Self> {
        let path = root.join("pom.xml");
        let content = read_manifest(&path)?;
        Some(Self { path, content })
    }

    pub fn from_content(content: &str) -> Self {
        Self {
            path: PathBuf::from("pom.xml"),
            content: content.to_string(),
        }
    }
}

/// Dependency coordinates from pom text. Blocks carrying elements other than
/// the coordinates (`<scope>`, `<exclusions>`) do not match.
pub fn parse_dependencies(content: &str) -> Vec<DependencyInfo> {
    DEPENDENCY_BLOCK
        .captures_iter(content)
        .map(|c| {
            DependencyInfo::new(
                &c[1],
                &c[2],
                c.get(4).map(|m| m.as_str()),
            )
        })
        .collect()
}

impl BuildManifest for MavenManifest {
    fn manifest_type(&self) -> ManifestType {
        ManifestType::Maven
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

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.2.0</version>
    </parent>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <dependency>
            <groupId>org.postgresql</groupId>
            <artifactId>postgresql</artifactId>
            <version>42.7.1</version>
        </dependency>
        <dependency>
            <groupId>org.junit</groupId>
            <artifactId>junit</artifactId>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>
"#;

    #[test]
    fn test_parse_dependencies() {
        let deps = parse_dependencies(POM);
        let coords: Vec<_> = deps.iter().map(|d| d.coordinates()).collect();
        assert_eq!(
            coords,
            vec![
                "org.springframework.boot:spring-boot-starter-web",
                "org.postgresql:postgresql:42.7.1",
            ]
        );
    }

    #[test]
    fn test_parent_is_not_a_dependency() {
        let manifest = MavenManifest::from_content(POM);
        assert!(manifest.has_framework_starter());
        assert!(manifest
            .dependencies()
            .iter()
            .all(|d| d.artifact_id != "spring-boot-starter-parent"));
    }

    #[test]
    fn test_malformed_pom_yields_nothing() {
        assert!(parse_dependencies("<dependency><groupId>broken").is_empty());
        assert!(parse_dependencies("").is_empty());
    }
}
