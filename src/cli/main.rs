//! mim-mapper: maps a serialized MIM information model onto a target model

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mim_model_mapper::cli::output::format_summary;
use mim_model_mapper::mapping::MapperConfig;
use mim_model_mapper::model::{MimModelLoader, ModelLoader};
use mim_model_mapper::models::Model;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

#[derive(Debug, Parser)]
#[command(name = "mim-mapper", version, about = "Map MIM information models onto target models")]
struct Args {
    /// Serialized source model (.json, .yaml or .yml)
    source: PathBuf,

    /// Alias for the mapped model (defaults to the file stem)
    #[arg(long)]
    alias: Option<String>,

    /// Mapper configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only map members declared on each object type itself
    #[arg(long)]
    no_inherited: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MapperConfig::default(),
    };
    if args.no_inherited {
        config = config.with_include_inherited(false);
    }

    let alias = match &args.alias {
        Some(alias) => alias.clone(),
        None => args
            .source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("model")
            .to_string(),
    };

    if args.verbose {
        eprintln!("Mapping model...");
        eprintln!("  Source: {}", args.source.display());
        eprintln!("  Alias: {}", alias);
        eprintln!("  Default SRID: {}", config.default_srid);
        eprintln!("  Unmapped types: {}", config.unmapped_types);
        eprintln!("  Inherited members: {}", config.include_inherited);
    }

    let loader = MimModelLoader::new().with_config(config);
    let model = loader
        .load(&alias, &args.source)
        .with_context(|| format!("Failed to map {}", args.source.display()))?;

    if args.verbose {
        eprintln!("Mapped {} object type(s)", model.len());
    }

    let rendered = render(&model, args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if args.verbose {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<MapperConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
}

fn render(model: &Model, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(model).context("Failed to serialize model")?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(model).context("Failed to serialize model")?,
        OutputFormat::Summary => format_summary(model),
    };
    Ok(rendered)
}
