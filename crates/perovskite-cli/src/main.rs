use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use perovskite_core::{vocabulary, Composition, Origin, RawComposition, ReferenceData, Site};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

mod logger;
mod settings;

use settings::Settings;

/// perovskite - normalize perovskite compositions into canonical JSON records
///
/// Reads a composition as entered by a user, cleans it, enriches the ions
/// from the reference tables, and writes the NOMAD composition document.
#[derive(Parser)]
#[command(name = "perovskite", version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Report lookups and loading details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a composition input file into a JSON record
    Convert {
        /// Input JSON file ("-" for stdin)
        input: PathBuf,
        /// Save the record here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reference data origin: local or online
        #[arg(long)]
        origin: Option<Origin>,
        /// Directory holding the local reference tables
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the short and long composition formulas
    Formula {
        /// Input JSON file ("-" for stdin)
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the standard options and known abbreviations
    Options {
        /// Reference data origin: local or online
        #[arg(long)]
        origin: Option<Origin>,
        /// Directory holding the local reference tables
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Why a command failed; decides the exit code
enum Failure {
    /// The input was rejected (exit 1)
    Input(String),
    /// Tables, settings or files were unavailable (exit 2)
    Environment(String),
}

impl From<perovskite_core::Error> for Failure {
    fn from(e: perovskite_core::Error) -> Self {
        if e.is_input_error() {
            Failure::Input(e.to_string())
        } else {
            Failure::Environment(e.to_string())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = logger::init(level);

    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(Failure::Input(msg)) => {
            eprintln!("{} {}", "error:".red().bold(), msg);
            1
        }
        Err(Failure::Environment(msg)) => {
            eprintln!("{} {}", "error:".red().bold(), msg);
            2
        }
    };

    process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<(), Failure> {
    match &cli.command {
        Commands::Convert {
            input,
            output,
            origin,
            data_dir,
        } => {
            let reference = load_reference(cli, *origin, data_dir.as_deref())?;
            let raw = read_input(input)?;
            let document = perovskite_core::convert(&raw, &reference)?;
            match output {
                Some(path) => {
                    let saved = document.save(path)?;
                    if !cli.quiet {
                        println!("{}", saved.display());
                    }
                }
                None => println!("{}", document.to_json()?),
            }
            Ok(())
        }
        Commands::Formula { input, json } => {
            let raw = read_input(input)?;
            let formula = Composition::normalize(&raw)?.formula();
            if *json {
                let text = serde_json::to_string_pretty(&formula)
                    .map_err(|e| Failure::Environment(e.to_string()))?;
                println!("{}", text);
            } else {
                println!("short form: {}", formula.short_form);
                println!("long form:  {}", formula.long_form);
            }
            Ok(())
        }
        Commands::Options {
            origin,
            data_dir,
            json,
        } => {
            let reference = load_reference(cli, *origin, data_dir.as_deref())?;
            print_options(&reference, *json)
        }
        Commands::Version => {
            println!(
                "perovskite {} (perovskite-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<RawComposition, Failure> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| Failure::Environment(format!("Could not read stdin: {}", e)))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| Failure::Environment(format!("Could not read {}: {}", path.display(), e)))?
    };
    Ok(RawComposition::from_json(&text)?)
}

fn load_reference(
    cli: &Cli,
    origin: Option<Origin>,
    data_dir: Option<&Path>,
) -> Result<ReferenceData, Failure> {
    let mut settings = Settings::load(cli.config.as_deref()).map_err(Failure::Environment)?;
    if let Some(origin) = origin {
        settings.origin = origin;
    }
    if let Some(dir) = data_dir {
        settings.data_dir = dir.to_path_buf();
    }
    log::debug!(
        "reference data: origin={}, data_dir={}",
        settings.origin,
        settings.data_dir.display()
    );
    Ok(ReferenceData::load(
        settings.origin,
        &settings.data_dir,
        &settings.online_base_url,
    )?)
}

fn print_options(reference: &ReferenceData, json: bool) -> Result<(), Failure> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let sections: Vec<(&str, &str, Vec<String>)> = vec![
        ("composition_estimates", "Composition estimates", strings(vocabulary::COMPOSITION_ESTIMATES)),
        ("dimensionalities", "Dimensionality", strings(vocabulary::DIMENSIONALITIES)),
        ("sample_types", "Sample types", strings(vocabulary::SAMPLE_TYPES)),
        ("additive_types", "Additive types", strings(vocabulary::ADDITIVE_TYPES)),
        ("concentration_metrics", "Concentration metrics", strings(vocabulary::CONCENTRATION_METRICS)),
        ("a_ions", "A-site ions", vocabulary::site_options(Site::A, &reference.a_ions)),
        ("b_ions", "B-site ions", vocabulary::site_options(Site::B, &reference.b_ions)),
        ("x_ions", "X-site ions", vocabulary::site_options(Site::X, &reference.x_ions)),
        ("additives", "Additives and impurities", vocabulary::additive_options(&reference.additives)),
    ];

    if json {
        let map: serde_json::Map<String, serde_json::Value> = sections
            .into_iter()
            .map(|(key, _, values)| (key.to_string(), serde_json::Value::from(values)))
            .collect();
        let text = serde_json::to_string_pretty(&map)
            .map_err(|e| Failure::Environment(e.to_string()))?;
        println!("{}", text);
    } else {
        for (_, title, values) in sections {
            println!("{}", title.bold());
            for value in values {
                println!("  {}", value);
            }
        }
    }
    Ok(())
}
