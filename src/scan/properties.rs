//! Runtime configuration scan and project URL derivation.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::read_lossy;

/// Directory holding the application configuration, relative to the root.
const RESOURCES_DIR: &str = "src/main/resources";

const PORT_KEY: &str = "server.port";
const CONTEXT_PATH_KEY: &str = "server.servlet.context-path";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Properties,
    Yaml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Properties => write!(f, "properties"),
            ConfigFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Candidate configuration files, in preference order.
const CANDIDATES: &[(&str, ConfigFormat)] = &[
    ("application.properties", ConfigFormat::Properties),
    ("application.yml", ConfigFormat::Yaml),
    ("application.yaml", ConfigFormat::Yaml),
];

/// The configuration file the project uses, if any.
pub fn find_configuration(root: &Path) -> Option<(PathBuf, ConfigFormat)> {
    let dir = root.join(RESOURCES_DIR);
    CANDIDATES
        .iter()
        .map(|(name, format)| (dir.join(name), *format))
        .find(|(path, _)| path.is_file())
}

/// Read the project's configuration as a flat, file-ordered map.
///
/// A missing or unreadable file yields an empty map.
pub fn read_configuration(root: &Path) -> IndexMap<String, String> {
    let Some((path, format)) = find_configuration(root) else {
        tracing::debug!(root = %root.display(), "no application configuration");
        return IndexMap::new();
    };

    match read_lossy(&path) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), %format, "reading configuration");
            parse_configuration(&text, format)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable configuration");
            IndexMap::new()
        }
    }
}

/// Split each line into a key and value.
///
/// Properties lines split on the first `=`, or on the first `": "` when the
/// line has no `=`. YAML lines split on the first `": "` only, so values such
/// as `jdbc:h2:mem:db;MODE=PostgreSQL` stay whole. Blank lines, `#` comments
/// and lines without a separator are skipped. YAML nesting is not
/// interpreted: `  port: 8081` becomes `port`.
///
/// A repeated key takes the later value but keeps its first position.
pub fn parse_configuration(text: &str, format: ConfigFormat) -> IndexMap<String, String> {
    let mut entries = IndexMap::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let split = match format {
            ConfigFormat::Properties => line.split_once('=').or_else(|| line.split_once(": ")),
            ConfigFormat::Yaml => line.split_once(": "),
        };
        if let Some((key, value)) = split {
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    entries
}

/// `http://localhost:<port><context-path>` for a configuration.
///
/// The port falls back to `default_port`. The context path is given a
/// leading `/` and stripped of trailing ones.
pub fn derive_project_url(config: &IndexMap<String, String>, default_port: &str) -> String {
    let port = config
        .get(PORT_KEY)
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .unwrap_or(default_port);

    let context = config
        .get(CONTEXT_PATH_KEY)
        .map(|c| normalize_context_path(c))
        .unwrap_or_default();

    format!("http://localhost:{}{}", port, context)
}

fn normalize_context_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
