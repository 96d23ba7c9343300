//! Command-line front end: extract collision triangles from rendered physics text

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use vphys::assets::{entity_name_from_entry_path, RenderedTextSource};
use vphys::config::{Config, ExtractorConfig};
use vphys::extract::{Extractor, OutputMode};
use vphys::foundation::logging;

fn cli() -> Command {
    Command::new("vphys_extract")
        .about("Extracts solid collision triangles from KV3 physics text")
        .arg(
            Arg::new("inputs")
                .value_name("FILE")
                .help("Physics text files (rendered PHYS blocks)")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help("Output file name (single input only)"),
        )
        .arg(
            Arg::new("entry-path")
                .long("entry-path")
                .value_name("PATH")
                .help("Package entry path to derive the output name from, e.g. maps/de_dust2/world_physics.vmdl_c"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Which files to write: raw, tri or both"),
        )
        .arg(
            Arg::new("tri-dir")
                .long("tri-dir")
                .value_name("DIR")
                .help("Directory for .tri files"),
        )
        .arg(
            Arg::new("vphys-dir")
                .long("vphys-dir")
                .value_name("DIR")
                .help("Directory for .vphys files"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (.toml or .ron)"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<ExtractorConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ExtractorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {path}"))?,
        None => ExtractorConfig::default(),
    };

    if let Some(mode) = matches.get_one::<String>("mode") {
        config.output.mode = mode.parse::<OutputMode>().map_err(anyhow::Error::msg)?;
    }
    if let Some(dir) = matches.get_one::<String>("tri-dir") {
        config.output.tri_dir = PathBuf::from(dir);
    }
    if let Some(dir) = matches.get_one::<String>("vphys-dir") {
        config.output.vphys_dir = PathBuf::from(dir);
    }
    Ok(config)
}

fn entity_name(matches: &ArgMatches, input: &Path) -> Result<String> {
    if let Some(name) = matches.get_one::<String>("name") {
        return Ok(name.clone());
    }
    if let Some(entry) = matches.get_one::<String>("entry-path") {
        return entity_name_from_entry_path(entry)
            .with_context(|| format!("Cannot derive a name from entry path {entry}"));
    }
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a name from {}", input.display()))
}

fn process_input(extractor: &Extractor<RenderedTextSource>, matches: &ArgMatches, input: &Path) -> Result<()> {
    let name = entity_name(matches, input)?;
    let bytes = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    log::info!("Processing {} as {name}", input.display());
    let output = extractor
        .process_resource(&name, &bytes)
        .with_context(|| format!("Failed to extract {}", input.display()))?;

    if let Some(report) = output.report {
        log::info!(
            "{name}: {} hulls, {} meshes, {} triangles ({} degenerate), {} faulted",
            report.hulls.processed,
            report.meshes.processed,
            report.triangles(),
            report.degenerate,
            report.faulted()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config = load_config(&matches)?;
    match config.log_filter.as_deref() {
        Some(filter) => logging::init_with_filter(filter),
        None => logging::init(),
    }

    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("inputs")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();
    if inputs.len() > 1 && (matches.contains_id("name") || matches.contains_id("entry-path")) {
        bail!("--name and --entry-path apply to a single input");
    }

    let extractor = Extractor::new(RenderedTextSource, &config.output);
    extractor.writer().validate().context("Output directory check failed")?;

    let mut failed = 0;
    for input in &inputs {
        if let Err(e) = process_input(&extractor, &matches, input) {
            log::error!("{e:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} input(s) failed", inputs.len());
    }
    Ok(())
}
