//! Two-pass graph assembly.
//!
//! Pass 1 discovers every declared type and classifies it. Pass 2 resolves
//! field types and supertypes against the completed symbol table, so it can
//! only start once pass 1 has seen every file. `GraphAssembler::assemble`
//! makes that barrier explicit: `SymbolTable::discover` returns the finished
//! table before any edge is considered.

use indexmap::{IndexMap, IndexSet};

use crate::analysis::FileDeclarations;

use super::{ArchitectureGraph, ComponentKind, Edge, Node, Relation};

/// In-project symbols discovered by pass 1, in first-seen order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    nodes: IndexMap<String, Node>,
    /// File each symbol was last taken from, for collision reports.
    origins: IndexMap<String, String>,
}

impl SymbolTable {
    /// Pass 1: one node per declared type name.
    ///
    /// Two declarations sharing a name collapse into one node. Input is
    /// expected in path order, so the declaration from the later path wins;
    /// the node keeps its first position.
    pub fn discover(files: &[FileDeclarations]) -> Self {
        let mut table = SymbolTable::default();

        for file in files {
            for decl in &file.declarations {
                let kind = ComponentKind::classify(&decl.markers);
                if let Some(previous) = table.origins.get(&decl.name) {
                    tracing::warn!(
                        name = %decl.name,
                        first = %previous,
                        second = %file.path,
                        "duplicate type name, keeping the later declaration"
                    );
                }
                table.origins.insert(decl.name.clone(), file.path.clone());
                table.nodes.insert(
                    decl.name.clone(),
                    Node {
                        id: decl.name.clone(),
                        label: decl.name.clone(),
                        kind,
                    },
                );
            }
        }

        table
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<ComponentKind> {
        self.nodes.get(name).map(|n| n.kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pass 2: edges whose target is an in-project symbol.
    pub fn resolve_edges(&self, files: &[FileDeclarations]) -> Vec<Edge> {
        let mut edges: IndexSet<Edge> = IndexSet::new();

        for decl in files.iter().flat_map(|f| f.declarations.iter()) {
            for field in &decl.fields {
                let target = core_type(&field.declared_type);
                if self.contains(&target) {
                    edges.insert(Edge {
                        source: decl.name.clone(),
                        target,
                        relation: Relation::Uses,
                    });
                }
            }

            for super_type in &decl.super_types {
                let target = simple_type_name(super_type);
                if self.contains(&target) {
                    edges.insert(Edge {
                        source: decl.name.clone(),
                        target,
                        relation: Relation::Extends,
                    });
                }
            }
        }

        edges.into_iter().collect()
    }

    fn into_nodes(self) -> Vec<Node> {
        self.nodes.into_values().collect()
    }
}

/// Builds an `ArchitectureGraph` from per-file declarations.
pub struct GraphAssembler;

impl GraphAssembler {
    /// Assemble the graph. `files` should be sorted by path for stable output.
    pub fn assemble(files: &[FileDeclarations]) -> ArchitectureGraph {
        let symbols = SymbolTable::discover(files);
        let edges = symbols.resolve_edges(files);

        tracing::debug!(
            nodes = symbols.len(),
            edges = edges.len(),
            "assembled component graph"
        );

        ArchitectureGraph {
            nodes: symbols.into_nodes(),
            edges,
        }
    }
}

/// Resolve a declared field type to the single type it refers to.
///
/// A parameterized type resolves to its first type argument (one level
/// only), anything else to itself:
///
/// - `List<Order>` → `Order`
/// - `Map<String, Order>` → `String`
/// - `Optional<? extends Order>` → `Order`
/// - `List<Set<Order>>` → `Set`
/// - `com.shop.Order[]` → `Order`
pub fn core_type(declared: &str) -> String {
    let declared = declared.trim();
    match declared.find('<') {
        Some(open) => simple_type_name(first_type_argument(&declared[open + 1..])),
        None => simple_type_name(declared),
    }
}

/// The first top-level argument of a type argument list (text after `<`).
fn first_type_argument(args: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => return &args[..i],
            '>' => depth -= 1,
            ',' if depth == 0 => return &args[..i],
            _ => {}
        }
    }
    args
}

/// Strip type arguments, array suffixes, wildcard bounds, annotations and
/// package qualifiers: `? extends com.shop.Order<X>[]` → `Order`.
pub fn simple_type_name(ty: &str) -> String {
    let mut ty = ty.trim();

    // Type annotations: `@NonNull Order`
    while let Some(rest) = ty.strip_prefix('@') {
        ty = match rest.split_once(char::is_whitespace) {
            Some((_, tail)) => tail.trim_start(),
            None => "",
        };
    }

    if let Some(rest) = ty.strip_prefix('?') {
        let rest = rest.trim_start();
        ty = rest
            .strip_prefix("extends")
            .or_else(|| rest.strip_prefix("super"))
            .map(str::trim_start)
            .unwrap_or(rest);
    }

    let ty = ty.split('<').next().unwrap_or(ty);
    let ty = ty.trim_end_matches(|c: char| c == '[' || c == ']' || c == '.' || c.is_whitespace());
    ty.rsplit('.').next().unwrap_or(ty).trim().to_string()
}
