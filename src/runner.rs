//! Analysis runner that orchestrates the graph and heuristic passes.
//!
//! Both passes walk the same tree independently. Files are collected and
//! sorted by path first, so results never depend on traversal order, and
//! per-file work may run on the rayon pool.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use rayon::prelude::*;

use crate::analysis::{declarations_for_file, FileDeclarations};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::graph::{ArchitectureGraph, GraphAssembler};
use crate::scan::{
    derive_project_url, detect_manifest, has_application_entry, read_configuration, read_lossy,
    scan_source, AnalysisResult, BuildManifest, ProjectKind, SourceFacts,
};
use crate::store::{validate_project_name, AnalysisStore};
use crate::walk::{is_java_source, SourceWalker};

/// Message recorded for projects that fail framework detection.
pub const UNSUPPORTED_MESSAGE: &str = "Not a Spring Boot project (skipped).";

/// Runs analyses and owns the result store.
pub struct Runner {
    config: AnalyzerConfig,
    excluded: Option<GlobSet>,
    store: AnalysisStore,
}

impl Runner {
    /// Create a runner. Fails only if `excluded_paths` does not compile.
    pub fn new(config: AnalyzerConfig) -> anyhow::Result<Self> {
        let excluded = config.excluded_globs()?;
        let store = AnalysisStore::new(&config.store_dir);
        Ok(Self {
            config,
            excluded,
            store,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn store(&self) -> &AnalysisStore {
        &self.store
    }

    /// Map a CLI argument to a project root.
    ///
    /// An existing directory is used as is. Anything else is treated as a
    /// bare project name under `projects_dir`, when one is configured.
    pub fn resolve_root(&self, name_or_path: &str) -> PathBuf {
        let as_path = PathBuf::from(name_or_path);
        if as_path.is_dir() {
            return as_path;
        }
        self.config.project_root(name_or_path).unwrap_or(as_path)
    }

    /// Build the component graph for a source tree.
    pub fn graph(&self, root: &Path) -> Result<ArchitectureGraph> {
        let sources = self.java_sources(root)?;
        tracing::debug!(root = %root.display(), files = sources.len(), "building graph");

        // Pass 1 needs every file before pass 2 may start; the assembler
        // receives the complete, path-ordered list.
        let declarations: Vec<FileDeclarations> =
            self.map_files(&sources, |p| declarations_for_file(root, p));

        Ok(GraphAssembler::assemble(&declarations))
    }

    /// Analyze a project and persist the result under `project_name`.
    ///
    /// Only a missing root or an unusable project name is an error. A failure
    /// to persist is recorded in the result's `error` field.
    pub fn analyze(&self, project_name: &str, root: &Path) -> Result<AnalysisResult> {
        validate_project_name(project_name)?;
        let sources = self.java_sources(root)?;
        let manifest = detect_manifest(root);

        let mut result = if self.is_supported(manifest.as_deref(), &sources) {
            let facts = self.map_files(&sources, source_facts);

            let mut result = AnalysisResult::new(project_name, ProjectKind::Supported);
            for file in facts {
                result.endpoints.extend(file.endpoints);
                result.entities.extend(file.entity);
            }
            result.dependencies = manifest.map(|m| m.dependencies()).unwrap_or_default();
            result.configuration = read_configuration(root);
            result.project_url =
                derive_project_url(&result.configuration, &self.config.default_port);
            result.summary = result.describe();
            result
        } else {
            tracing::info!(project = %project_name, root = %root.display(), "unsupported project");
            AnalysisResult::unsupported(project_name, UNSUPPORTED_MESSAGE)
        };

        if let Err(e) = self.store.save(&result) {
            tracing::warn!(project = %project_name, error = %e, "failed to persist analysis");
            let message = format!("failed to persist analysis: {}", e);
            result.error = if result.error.is_empty() {
                message
            } else {
                format!("{} {}", result.error, message)
            };
        }

        Ok(result)
    }

    /// The last persisted analysis of a project, without rescanning.
    pub fn stored_analysis(&self, project_name: &str) -> Result<Option<AnalysisResult>> {
        self.store.load(project_name)
    }

    /// The framework detection predicate: a starter in the build manifest,
    /// or an application entry marker in any source file.
    fn is_supported(
        &self,
        manifest: Option<&dyn BuildManifest>,
        sources: &[PathBuf],
    ) -> bool {
        if let Some(m) = manifest {
            if m.has_framework_starter() {
                tracing::debug!(
                    manifest = %m.path().display(),
                    kind = %m.manifest_type(),
                    "framework starter found"
                );
                return true;
            }
        }

        let has_entry = |p: &PathBuf| read_text(p).is_some_and(|t| has_application_entry(&t));
        if self.config.parallel {
            sources.par_iter().any(has_entry)
        } else {
            sources.iter().any(has_entry)
        }
    }

    fn java_sources(&self, root: &Path) -> Result<Vec<PathBuf>> {
        SourceWalker::new(root)
            .exclude(self.excluded.clone())
            .collect_sorted(is_java_source)
    }

    /// Apply `f` to every file, keeping input order.
    fn map_files<T, F>(&self, files: &[PathBuf], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Path) -> T + Sync + Send,
    {
        if self.config.parallel {
            files.par_iter().map(|p| f(p.as_path())).collect()
        } else {
            files.iter().map(|p| f(p.as_path())).collect()
        }
    }
}

/// Line-scan facts for one file; an unreadable file contributes nothing.
fn source_facts(path: &Path) -> SourceFacts {
    let Some(text) = read_text(path) else {
        return SourceFacts::default();
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    scan_source(&text, &stem)
}

fn read_text(path: &Path) -> Option<String> {
    match read_lossy(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use crate::graph::Relation;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn runner(store: &Path, parallel: bool) -> Runner {
        Runner::new(AnalyzerConfig {
            store_dir: store.to_path_buf(),
            parallel,
            ..Default::default()
        })
        .unwrap()
    }

    fn spring_project(root: &Path) {
        write(
            root,
            "src/main/java/shop/App.java",
            "@SpringBootApplication\npublic class App {\n  public static void main(String[] a) { SpringApplication.run(App.class, a); }\n}\n",
        );
        write(
            root,
            "src/main/java/shop/ItemController.java",
            "@RestController\n@RequestMapping(\"/items\")\npublic class ItemController {\n  private ItemService service;\n  @GetMapping(\"/{id}\")\n  public Item get() { return null; }\n}\n",
        );
        write(
            root,
            "src/main/java/shop/ItemService.java",
            "@Service\npublic class ItemService {\n  private List<Item> cache;\n}\n",
        );
        write(
            root,
            "src/main/java/shop/Item.java",
            "@Entity\n@Table(name = \"items\")\npublic class Item {\n  private Long id;\n}\n",
        );
    }

    #[test]
    fn test_analyze_supported_project() {
        let project = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        spring_project(project.path());

        let result = runner(store.path(), true)
            .analyze("shop", project.path())
            .unwrap();

        assert_eq!(result.kind, ProjectKind::Supported);
        assert_eq!(result.project_url, "http://localhost:8080");
        assert_eq!(result.endpoints.len(), 1);
        assert_eq!(result.endpoints[0].path, "/items/{id}");
        assert_eq!(result.entities[0].table_name, "items");
        assert!(result.error.is_empty());
        assert_eq!(
            result.summary,
            "1 endpoint across 1 controller, 1 entity, 0 dependencies"
        );
        assert!(store.path().join("shop/analysis.json").is_file());
    }

    #[test]
    fn test_graph_sequential_matches_parallel() {
        let project = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        spring_project(project.path());

        let par = runner(store.path(), true).graph(project.path()).unwrap();
        let seq = runner(store.path(), false).graph(project.path()).unwrap();
        assert_eq!(par, seq);
        assert!(par.has_edge("ItemController", "ItemService", Relation::Uses));
        assert!(par.has_edge("ItemService", "Item", Relation::Uses));
    }

    #[test]
    fn test_records_are_components() {
        let project = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        spring_project(project.path());
        write(
            project.path(),
            "src/main/java/shop/ItemView.java",
            "public record ItemView(Item item, String label) {}\n",
        );
        write(
            project.path(),
            "src/main/java/shop/ViewService.java",
            "@Service\npublic class ViewService {\n  private List<ItemView> views;\n}\n",
        );

        let graph = runner(store.path(), false).graph(project.path()).unwrap();
        assert!(graph.node("ItemView").is_some());
        assert!(graph.has_edge("ViewService", "ItemView", Relation::Uses));
        assert!(graph.has_edge("ItemView", "Item", Relation::Uses));
    }

    #[test]
    fn test_unsupported_project_is_persisted() {
        let project = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        write(project.path(), "Main.java", "public class Main {}\n");

        let runner = runner(store.path(), false);
        let result = runner.analyze("plain", project.path()).unwrap();
        assert_eq!(result.kind, ProjectKind::Unsupported);
        assert_eq!(result.error, UNSUPPORTED_MESSAGE);

        let stored = runner.stored_analysis("plain").unwrap().unwrap();
        assert_eq!(stored, result);
    }

    #[test]
    fn test_latin1_manifest_and_configuration() {
        let project = TempDir::new().unwrap();
        let store = TempDir::new().unwrap();
        write(project.path(), "src/main/java/Main.java", "public class Main {}\n");
        fs::write(
            project.path().join("pom.xml"),
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<!-- D\xe9p\xf4t -->\n\
              <project><dependencies><dependency>\n\
              <groupId>org.springframework.boot</groupId>\n\
              <artifactId>spring-boot-starter-web</artifactId>\n\
              </dependency></dependencies></project>\n",
        )
        .unwrap();
        let resources = project.path().join("src/main/resources");
        fs::create_dir_all(&resources).unwrap();
        fs::write(
            resources.join("application.properties"),
            b"# Caf\xe9\nserver.port=8081\nserver.servlet.context-path=/api\n",
        )
        .unwrap();

        let result = runner(store.path(), false)
            .analyze("latin", project.path())
            .unwrap();
        assert_eq!(result.kind, ProjectKind::Supported);
        assert_eq!(result.dependencies.len(), 1);
        assert_eq!(result.project_url, "http://localhost:8081/api");
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let store = TempDir::new().unwrap();
        let err = runner(store.path(), true)
            .analyze("ghost", Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::NotFound(_)));
    }

    #[test]
    fn test_persist_failure_goes_into_error_field() {
        let project = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        spring_project(project.path());

        // A file where the store directory should be.
        let store_path = scratch.path().join("store");
        fs::write(&store_path, "not a directory").unwrap();

        let result = runner(&store_path, true)
            .analyze("shop", project.path())
            .unwrap();
        assert_eq!(result.kind, ProjectKind::Supported);
        assert!(result.error.contains("failed to persist analysis"));
    }

    #[test]
    fn test_resolve_root() {
        let projects = TempDir::new().unwrap();
        let runner = Runner::new(AnalyzerConfig {
            projects_dir: Some(projects.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        let dir = projects.path().to_string_lossy().to_string();
        assert_eq!(runner.resolve_root(&dir), projects.path());
        assert_eq!(runner.resolve_root("shop"), projects.path().join("shop"));
    }
}
