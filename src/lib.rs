//! Archlens - static architecture analyzer for Spring Boot source trees.
//!
//! Given the root of a Java project that need not compile, archlens
//! reconstructs an approximate architectural model without building or
//! running anything: a classified component graph, the exposed REST
//! endpoints, JPA entities, declared build dependencies and the effective
//! runtime configuration.
//!
//! # Architecture
//!
//! - `walk`: source tree enumeration
//! - `analysis`: tree-sitter declaration parsing, one parser per language
//! - `graph`: two-pass component graph assembly
//! - `scan`: line-oriented heuristics over raw text (endpoints, entities,
//!   build manifests, configuration)
//! - `runner`: orchestration, framework detection and result assembly
//! - `store`: persisted analysis results
//! - `config`: YAML analyzer configuration
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/`. Implement the `DeclarationParser` trait
//! and register it in `languages/mod.rs`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod runner;
pub mod scan;
pub mod store;
pub mod walk;

pub use analysis::{
    register_parsers, DeclarationKind, DeclarationParser, FileDeclarations, JavaParser,
    TypeDeclaration,
};
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, Result};
pub use graph::{ArchitectureGraph, ComponentKind, Edge, GraphAssembler, Node, Relation};
pub use runner::Runner;
pub use scan::{AnalysisResult, ApiEndpoint, DependencyInfo, EntityInfo, ProjectKind};
pub use store::AnalysisStore;
pub use walk::SourceWalker;

/// Initialize all subsystems.
///
/// Call this once at startup. Parsers are also registered lazily on first
/// use, so library callers may skip it.
pub fn init() {
    register_parsers();
}
