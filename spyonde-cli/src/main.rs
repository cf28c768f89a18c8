//! Command-line interface for spyonde
//! Converts cell-separated Python scripts (Spyder `#%%` cells) into Jupyter notebooks.
//!
//! Usage:
//!   spyonde `<files>...` [--nbversion `<version>`] [--overwrite] [--output `<path>`]
//!   spyonde `<file>` --output `<path>`      - Write a single notebook to a chosen path
//!   spyonde `<files>...` --config `<file>`  - Layer a configuration file over the defaults
//!
//! Each notebook is written next to its script as `<script>.gen.ipynb` unless `--output`
//! names another path. An existing notebook is only replaced after a y/n confirmation,
//! or straight away with `--overwrite`.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use spyonde_config::{Loader, SpyondeConfig};
use spyonde_parser::spyonde::{convert_file, Conversion, ConversionStatus, ConvertRequest};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Local configuration picked up from the working directory when present
const LOCAL_CONFIG: &str = "spyonde.toml";

fn build_cli() -> Command {
    Command::new("spyonde")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts cell-separated Python scripts into Jupyter notebooks")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("Python scripts to convert")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("nbversion")
                .long("nbversion")
                .help("Python version written into the notebook, overriding convert.nbversion")
                .value_name("VERSION"),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Replace existing notebooks without asking")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output path; only valid with a single input file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./spyonde.toml")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log each conversion stage")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });

    let files: Vec<&PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.collect())
        .unwrap_or_default();
    let output = matches.get_one::<PathBuf>("output");
    if output.is_some() && files.len() > 1 {
        eprintln!("--output can only be used with a single input file");
        process::exit(2);
    }

    let mut failed = false;
    for file in files {
        if !file.is_file() {
            println!("NOT a file: {}", file.display());
            continue;
        }
        let request = build_request(file, output, &config);
        if let Err(e) = handle_convert_command(&request) {
            eprintln!("Error converting {}: {}", file.display(), e);
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Defaults, then ./spyonde.toml, then --config, then command-line flags
fn load_config(matches: &ArgMatches) -> Result<SpyondeConfig, String> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(version) = matches.get_one::<String>("nbversion") {
        loader = loader
            .set_override("convert.nbversion", version.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("overwrite") {
        loader = loader
            .set_override("convert.overwrite", true)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn build_request(input: &Path, output: Option<&PathBuf>, config: &SpyondeConfig) -> ConvertRequest {
    let request = ConvertRequest::new(input, config.convert.nbversion.as_str())
        .with_overwrite(config.convert.overwrite)
        .with_output_suffix(config.convert.output_suffix.as_str());
    match output {
        Some(path) => request.with_output(path),
        None => request,
    }
}

/// Convert one file, asking before an existing notebook is replaced
fn handle_convert_command(request: &ConvertRequest) -> Result<(), Box<dyn std::error::Error>> {
    debug!(input = %request.input.display(), version = %request.version, "converting");
    let mut conversion = convert_file(request)?;

    if conversion.status == ConversionStatus::PendingOverwrite {
        println!("File exists: {}", conversion.output_path.display());
        println!("Do you want to overwrite? y/n");
        if ask_confirmation(">>> ")? {
            conversion.commit()?;
        }
    }
    report(&conversion);
    Ok(())
}

fn report(conversion: &Conversion) {
    match conversion.ensure_written() {
        Ok(path) => println!("created: {}", path.display()),
        Err(e) => println!("file is not written. {}", e),
    }
}

/// Read one answer from stdin. End of input counts as "no".
fn ask_confirmation(prompt: &str) -> io::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}

/// Only "y" and "yes" confirm, in any case and with surrounding whitespace
fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
