//! Analyzer configuration.
//!
//! Configuration lives in a small YAML file. Every key is optional, so an
//! absent file and an empty file both yield the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Config file names searched in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["archlens.yaml", ".archlens.yaml"];

/// Port used for `projectUrl` when the project does not configure one.
pub const FALLBACK_PORT: &str = "8080";

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Root of the analysis store (`<store_dir>/<project>/analysis.json`).
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Base directory for resolving bare project names.
    #[serde(default)]
    pub projects_dir: Option<PathBuf>,
    #[serde(default = "default_port")]
    pub default_port: String,
    /// Glob patterns for paths to skip, relative to the project root.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Read and parse files on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("analyzed")
}

fn default_port() -> String {
    FALLBACK_PORT.to_string()
}

fn default_parallel() -> bool {
    true
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            projects_dir: None,
            default_port: default_port(),
            excluded_paths: Vec::new(),
            parallel: default_parallel(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a configuration from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AnalyzerConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the explicit config file, or discover one, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(),
        };

        let config = match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading config");
                Self::parse_file(&p)?
            }
            None => Self::default(),
        };
        validate(&config)?;
        Ok(config)
    }

    /// Compile `excluded_paths` into a matcher, or `None` when nothing is excluded.
    pub fn excluded_globs(&self) -> anyhow::Result<Option<GlobSet>> {
        if self.excluded_paths.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid excluded path {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(Some(builder.build()?))
    }

    /// Resolve a bare project name against `projects_dir`.
    pub fn project_root(&self, name: &str) -> Option<PathBuf> {
        self.projects_dir.as_ref().map(|dir| dir.join(name))
    }
}

/// Find a config file in the working directory, then in the user config dir.
fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.is_file() {
            return Some(path);
        }
    }

    directories::ProjectDirs::from("", "", "archlens")
        .map(|dirs| dirs.config_dir().join("archlens.yaml"))
        .filter(|p| p.is_file())
}

/// Check a configuration for values that would break analysis later.
pub fn validate(config: &AnalyzerConfig) -> anyhow::Result<()> {
    if config.default_port.is_empty() || !config.default_port.chars().all(|c| c.is_ascii_digit())
    {
        anyhow::bail!(
            "default_port must be a decimal port number, got {:?}",
            config.default_port
        );
    }

    if config.store_dir.as_os_str().is_empty() {
        anyhow::bail!("store_dir must not be empty");
    }

    config.excluded_globs()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AnalyzerConfig::parse_str("").unwrap();
        assert_eq!(config.store_dir, PathBuf::from("analyzed"));
        assert_eq!(config.default_port, "8080");
        assert!(config.parallel);
        assert!(config.projects_dir.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
store_dir: /var/lib/archlens
projects_dir: /srv/projects/backend
default_port: "9000"
excluded_paths:
  - "**/generated/**"
parallel: false
"#;
        let config = AnalyzerConfig::parse_str(yaml).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/var/lib/archlens"));
        assert_eq!(config.default_port, "9000");
        assert!(!config.parallel);
        assert_eq!(
            config.project_root("shop"),
            Some(PathBuf::from("/srv/projects/backend/shop"))
        );

        let globs = config.excluded_globs().unwrap().unwrap();
        assert!(globs.is_match("src/generated/Foo.java"));
        assert!(!globs.is_match("src/main/java/Foo.java"));
    }

    #[test]
    fn test_validate_rejects_bad_port() {
        let config = AnalyzerConfig {
            default_port: "http".to_string(),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let config = AnalyzerConfig {
            excluded_paths: vec!["src/[".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("archlens.yaml");
        fs::write(&path, "default_port: \"7070\"\n").unwrap();

        let config = AnalyzerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.default_port, "7070");
    }
}
