//! Output formatting for archlens results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the same records that are persisted, for programmatic consumption

use colored::*;

use crate::graph::{ArchitectureGraph, ComponentKind, Relation};
use crate::scan::AnalysisResult;

// =============================================================================
// JSON Format
// =============================================================================

/// Graph as pretty JSON: `{"nodes": [...], "edges": [...]}`.
pub fn graph_json(graph: &ArchitectureGraph) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Analysis result as pretty JSON, byte-for-byte the stored format.
pub fn analysis_json(result: &AnalysisResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn write_graph_json(graph: &ArchitectureGraph) -> anyhow::Result<()> {
    println!("{}", graph_json(graph)?);
    Ok(())
}

pub fn write_analysis_json(result: &AnalysisResult) -> anyhow::Result<()> {
    println!("{}", analysis_json(result)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header(label: &str, value: &str) {
    println!();
    print!("  ");
    print!("{}", "archlens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", format!("{:<10}", label).dimmed());
    println!("{}", value);
    println!();
}

/// Write the component graph for a terminal.
pub fn write_graph_pretty(path: &str, graph: &ArchitectureGraph) {
    write_header("Scanning:", path);

    let counts: Vec<String> = graph
        .kind_counts()
        .iter()
        .map(|(kind, n)| format!("{} {}", n, kind.as_str().to_lowercase()))
        .collect();
    print!("  {} components", graph.nodes.len().to_string().bold());
    if !counts.is_empty() {
        print!("  {}", format!("({})", counts.join(", ")).dimmed());
    }
    println!();
    println!("  {} relations", graph.edges.len().to_string().bold());
    println!();

    if !graph.nodes.is_empty() {
        println!("  {} ({}):", "Components".bold(), graph.nodes.len());
        println!();
        for node in &graph.nodes {
            println!("    {} {}", kind_tag(node.kind), node.label);
        }
        println!();
    }

    if !graph.edges.is_empty() {
        println!("  {} ({}):", "Relations".bold(), graph.edges.len());
        println!();
        for edge in &graph.edges {
            println!(
                "    {} {} {}",
                edge.source,
                relation_arrow(edge.relation),
                edge.target
            );
        }
        println!();
    }
}

/// Write an analysis result for a terminal.
pub fn write_analysis_pretty(result: &AnalysisResult) {
    write_header("Project:", &result.project_name);

    if result.is_supported() {
        print!("  {}", "✓ SUPPORTED".green());
    } else {
        print!("  {}", "✗ UNSUPPORTED".yellow());
    }
    println!(
        "  {}",
        format!("analyzed {}", result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
    );
    if !result.summary.is_empty() {
        println!("  {}", result.summary);
    }
    if !result.project_url.is_empty() {
        print!("  {}", "URL: ".dimmed());
        println!("{}", result.project_url.blue().underline());
    }
    println!();

    if !result.endpoints.is_empty() {
        println!("  {} ({}):", "Endpoints".bold(), result.endpoints.len());
        println!();
        for e in &result.endpoints {
            print!("    {}", method_tag(&e.http_method));
            print!(" {:<40}", e.path);
            println!("{}", e.controller_name.dimmed());
        }
        println!();
    }

    if !result.entities.is_empty() {
        println!("  {} ({}):", "Entities".bold(), result.entities.len());
        println!();
        for entity in &result.entities {
            print!("    {}", entity.name);
            if !entity.table_name.is_empty() {
                print!("  {}", format!("→ {}", entity.table_name).dimmed());
            }
            println!();
        }
        println!();
    }

    if !result.dependencies.is_empty() {
        println!("  {} ({}):", "Dependencies".bold(), result.dependencies.len());
        println!();
        for dep in &result.dependencies {
            println!("    {}", dep.coordinates());
        }
        println!();
    }

    if !result.configuration.is_empty() {
        println!("  {} ({}):", "Configuration".bold(), result.configuration.len());
        println!();
        for (key, value) in &result.configuration {
            println!("    {} = {}", key.dimmed(), value);
        }
        println!();
    }

    if !result.error.is_empty() {
        println!("  {} {}", "Note:".yellow().bold(), result.error);
        println!();
    }
}

fn kind_tag(kind: ComponentKind) -> ColoredString {
    let tag = format!("{:<10}", kind.as_str());
    match kind {
        ComponentKind::Controller => tag.magenta(),
        ComponentKind::Service => tag.blue(),
        ComponentKind::Repository => tag.cyan(),
        ComponentKind::Entity => tag.green(),
        ComponentKind::Component | ComponentKind::Config => tag.yellow(),
        ComponentKind::Other => tag.dimmed(),
    }
}

fn relation_arrow(relation: Relation) -> ColoredString {
    match relation {
        Relation::Uses => "──uses──▶".dimmed(),
        Relation::Extends => "──extends──▷".dimmed(),
    }
}

fn method_tag(method: &str) -> ColoredString {
    let tag = format!("{:<6}", method);
    match method {
        "GET" => tag.green(),
        "POST" => tag.yellow(),
        "PUT" => tag.blue(),
        "DELETE" => tag.red(),
        _ => tag.normal(),
    }
}
