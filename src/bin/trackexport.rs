use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Advanced Tracking Data Export: per-frame transform and tracking data as JSON.
#[derive(Parser, Debug)]
#[command(name = "trackexport", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the compositions of a project.
    List(ListArgs),
    /// Export one composition's tracking data as JSON.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Composition name or 1-based index (defaults to the first composition).
    #[arg(long)]
    comp: Option<String>,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Write single-line JSON instead of indented output.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn read_project(path: &Path) -> anyhow::Result<trackexport::Project> {
    let project = trackexport::Project::from_path(path)
        .with_context(|| format!("load project '{}'", path.display()))?;
    if project.compositions.is_empty() {
        return Err(trackexport::TrackError::no_scene(format!(
            "project '{}' has no compositions",
            path.display()
        ))
        .into());
    }
    Ok(project)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    for (i, name) in project.composition_names().into_iter().enumerate() {
        println!("{}\t{}", i + 1, name);
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let comp = match args.comp.as_deref() {
        Some(selector) => project.composition(selector)?,
        None => project.first_composition()?,
    };

    let record = trackexport::collect_composition(comp)
        .with_context(|| format!("export of '{}' did not complete", comp.name))?;

    let opts = trackexport::ExportOptions {
        pretty: !args.compact,
        overwrite: !args.no_overwrite,
    };
    trackexport::write_json(&record, &args.out, &opts)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!(
        "exported tracking data for '{}' to {}",
        record.name,
        args.out.display()
    );
    Ok(())
}
