//! Component graph types.
//!
//! A graph has one node per declared type, classified by its markers, and
//! edges for field usage (`USES`) and inheritance (`EXTENDS`). Every edge
//! endpoint is a node of the same graph.

mod assembler;

use std::collections::HashSet;
use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

pub use assembler::{core_type, simple_type_name, GraphAssembler, SymbolTable};

/// Architectural role of a type.
///
/// Variants are declared in classification priority order: when a type
/// carries markers for several roles, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    Controller,
    Service,
    Repository,
    Entity,
    Component,
    Config,
    Other,
}

/// Marker names and the role each one signals.
static MARKER_KINDS: phf::Map<&'static str, ComponentKind> = phf_map! {
    "RestController" => ComponentKind::Controller,
    "Controller" => ComponentKind::Controller,
    "Service" => ComponentKind::Service,
    "Repository" => ComponentKind::Repository,
    "Entity" => ComponentKind::Entity,
    "Component" => ComponentKind::Component,
    "Configuration" => ComponentKind::Config,
};

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Controller => "CONTROLLER",
            ComponentKind::Service => "SERVICE",
            ComponentKind::Repository => "REPOSITORY",
            ComponentKind::Entity => "ENTITY",
            ComponentKind::Component => "COMPONENT",
            ComponentKind::Config => "CONFIG",
            ComponentKind::Other => "OTHER",
        }
    }

    /// Classify a declaration by its markers. Unrecognized markers are ignored.
    pub fn classify<S: AsRef<str>>(markers: &[S]) -> Self {
        markers
            .iter()
            .filter_map(|m| MARKER_KINDS.get(m.as_ref()))
            .min()
            .copied()
            .unwrap_or(ComponentKind::Other)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    Uses,
    Extends,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Uses => "USES",
            Relation::Extends => "EXTENDS",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The declared type name; unique within a graph.
    pub id: String,
    pub label: String,
    pub kind: ComponentKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: Relation,
}

/// The assembled component graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ArchitectureGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_edge(&self, source: &str, target: &str, relation: Relation) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target && e.relation == relation)
    }

    /// Edges whose source or target is not a node of this graph.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    /// Number of nodes of each kind, in priority order, omitting empty kinds.
    pub fn kind_counts(&self) -> Vec<(ComponentKind, usize)> {
        let mut counts: Vec<(ComponentKind, usize)> = Vec::new();
        for node in &self.nodes {
            match counts.iter_mut().find(|(k, _)| *k == node.kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((node.kind, 1)),
            }
        }
        counts.sort_by_key(|(k, _)| *k);
        counts
    }
}
