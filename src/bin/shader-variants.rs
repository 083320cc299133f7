//! Command-line viewer for preprocessed shader variant transcripts.
//!
//! Usage:
//!   shader-variants `<transcript>` --shader-path `<path>`                 - Show the first variant
//!   shader-variants `<transcript>` --global "FOO _BAR" --collapse       - Show a variant's file sections
//!   shader-variants `<transcript>` --list                               - List keyword combinations
//!   shader-variants `<transcript>` --row 120                            - Trace a row back to its source

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shader_variant_explorer::{ExplorerConfig, LineSection, RootPaths, ShaderExplorer};

#[derive(Parser)]
#[command(name = "shader-variants")]
#[command(author, version)]
#[command(about = "Browse the variants of a preprocessed shader transcript")]
struct Cli {
    /// Preprocessed transcript written by the shader toolchain
    transcript: PathBuf,

    /// Source file of the shader; `#line` directives without a file refer to it
    #[arg(long, default_value = "")]
    shader_path: String,

    /// TOML file with `[roots]` and `[dialect]` settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Editor install folder; derives all path roots together with --project-root
    #[arg(long, requires = "project_root")]
    install_root: Option<String>,

    /// Project folder
    #[arg(long, requires = "install_root")]
    project_root: Option<String>,

    /// The transcript has a single `Keywords:` header per variant
    #[arg(long)]
    no_local_keywords: bool,

    /// Global keywords to select, space-separated
    #[arg(long)]
    global: Option<String>,

    /// Local keywords to select, space-separated
    #[arg(long)]
    local: Option<String>,

    /// Show only the first line of each file section
    #[arg(long)]
    collapse: bool,

    /// List all keyword combinations instead of showing lines
    #[arg(long)]
    list: bool,

    /// Print where the given displayed row came from
    #[arg(long)]
    row: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = match &cli.config {
        Some(path) => ExplorerConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    if let (Some(install), Some(project)) = (&cli.install_root, &cli.project_root) {
        config.roots = RootPaths::for_install(install, project);
    }
    if cli.no_local_keywords {
        config.dialect.local_keywords = false;
    }

    let text = std::fs::read_to_string(&cli.transcript)
        .with_context(|| format!("reading {}", cli.transcript.display()))?;

    let mut explorer = ShaderExplorer::new(&config.roots, config.dialect);
    explorer.load_transcript(&text, &cli.shader_path);

    // Without a toolchain to ask, every keyword seen in the transcript counts as available.
    let (global, local) = transcript_keywords(&explorer);
    explorer.set_available_keywords(&global, &local);
    explorer.select_variant(0);
    explorer.set_collapsed(cli.collapse);

    if let Some(keywords) = &cli.global {
        explorer.global_keywords_mut().set_selection_str(keywords, false);
    }
    if let (Some(keywords), Some(selection)) = (&cli.local, explorer.local_keywords_mut()) {
        selection.set_selection_str(keywords, false);
    }

    if cli.list {
        return list_variants(&explorer, cli.json);
    }

    if let Some(row) = cli.row {
        let provenance = explorer
            .select_row(row)
            .with_context(|| format!("row {} is out of range", row))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&provenance)?);
        } else if provenance.has_origin() {
            println!(
                "{} (occurrence {}) line {}",
                provenance.canonical_path, provenance.occurrence, provenance.original_line_number
            );
        } else {
            println!("no known origin");
        }
        return Ok(());
    }

    let lines = explorer.displayed_lines();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else if lines.is_empty() {
        println!("(no lines for this keyword combination)");
    } else {
        for (row, line) in lines.iter().enumerate() {
            print_line(row, line);
        }
    }

    Ok(())
}

fn transcript_keywords(explorer: &ShaderExplorer) -> (Vec<String>, Vec<String>) {
    let mut global = BTreeSet::new();
    let mut local = BTreeSet::new();

    for variant in explorer.variants() {
        global.extend(variant.global_keywords.split_whitespace().map(str::to_string));
        if let Some(keywords) = &variant.local_keywords {
            local.extend(keywords.split_whitespace().map(str::to_string));
        }
    }

    (global.into_iter().collect(), local.into_iter().collect())
}

fn list_variants(explorer: &ShaderExplorer, json: bool) -> anyhow::Result<()> {
    if json {
        let labels: Vec<String> = explorer.variants().iter().map(|v| v.menu_label()).collect();
        println!("{}", serde_json::to_string_pretty(&labels)?);
    } else {
        for (idx, variant) in explorer.variants().iter().enumerate() {
            println!("{:4}  {}", idx, variant.menu_label());
        }
    }
    Ok(())
}

fn print_line(row: usize, line: &LineSection) {
    println!(
        "{:06} {:06}  {}    {}",
        row,
        line.original_line_number,
        line.content,
        line.display_label.as_deref().unwrap_or("")
    );
}
