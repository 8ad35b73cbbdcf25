//! Command-line interface for archlens.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::AnalyzerConfig;
use crate::report;
use crate::runner::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Commented default configuration written by `archlens init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/archlens.yaml");

/// Static architecture analyzer for Spring Boot source trees.
///
/// Archlens reconstructs a component graph, the exposed REST endpoints,
/// JPA entities, build dependencies and runtime configuration of a Java
/// project without compiling or running it.
#[derive(Parser)]
#[command(name = "archlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug events to stderr (overridden by ARCHLENS_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and store the result
    Analyze(AnalyzeArgs),
    /// Print the component graph of a source tree
    Graph(GraphArgs),
    /// Print the last stored analysis of a project
    Show(ShowArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Options shared by the commands that load a configuration.
#[derive(Args)]
pub struct CommonArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Project directory, or a project name under `projects_dir`
    pub project: String,

    /// Name to store the result under (default: the directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Project directory
    pub path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project name
    pub name: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "archlens.yaml")]
    pub output: PathBuf,
}

fn runner_for(args: &CommonArgs) -> anyhow::Result<Runner> {
    let config = AnalyzerConfig::load(args.config.as_deref())?;
    Runner::new(config)
}

/// Store key for a project root: the explicit name, else the directory name.
fn project_name(explicit: Option<&str>, root: &Path) -> anyhow::Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }

    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow::anyhow!("cannot derive a project name from {}", root.display()))
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let runner = runner_for(&args.common)?;
    let root = runner.resolve_root(&args.project);
    let name = project_name(args.name.as_deref(), &root)?;

    let result = runner.analyze(&name, &root)?;

    match args.common.format {
        OutputFormat::Json => report::write_analysis_json(&result)?,
        OutputFormat::Pretty => report::write_analysis_pretty(&result),
    }

    if result.is_supported() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the graph command.
pub fn run_graph(args: &GraphArgs) -> anyhow::Result<i32> {
    let runner = runner_for(&args.common)?;
    let graph = runner.graph(&args.path)?;

    match args.common.format {
        OutputFormat::Json => report::write_graph_json(&graph)?,
        OutputFormat::Pretty => report::write_graph_pretty(&args.path.to_string_lossy(), &graph),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the show command.
pub fn run_show(args: &ShowArgs) -> anyhow::Result<i32> {
    let runner = runner_for(&args.common)?;

    let Some(result) = runner.stored_analysis(&args.name)? else {
        eprintln!("No stored analysis for {:?}", args.name);
        eprintln!("Run 'archlens analyze <path> --name {}' first", args.name);
        return Ok(EXIT_FAILED);
    };

    match args.common.format {
        OutputFormat::Json => report::write_analysis_json(&result)?,
        OutputFormat::Pretty => report::write_analysis_pretty(&result),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&args.output, CONFIG_TEMPLATE)?;

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to point store_dir and projects_dir at your layout", args.output.display());
    println!("  2. Run: archlens analyze <project> --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
