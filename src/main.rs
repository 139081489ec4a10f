//! Pipeline entry point — CLI wiring and one-shot batch run.

use std::path::{Path, PathBuf};
use std::process;

use energy_insights::analysis;
use energy_insights::config::AnalysisConfig;
use energy_insights::io::export::export_csv;
use energy_insights::io::store;
use energy_insights::report::RunReport;

/// Parsed CLI arguments.
struct CliArgs {
    usage_path: PathBuf,
    out_dir: PathBuf,
    config_path: Option<PathBuf>,
    csv_out: Option<PathBuf>,
}

fn print_help() {
    eprintln!("energy-insights — offline analytics for home solar + battery usage data");
    eprintln!();
    eprintln!("Usage: energy-insights --usage <path> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --usage <path>    Raw usage records JSON file (required)");
    eprintln!("  --out <dir>       Result-set output directory (default: data)");
    eprintln!("  --config <path>   Analysis parameters TOML file");
    eprintln!("  --csv <path>      Also export daily summaries as CSV");
    eprintln!("  --help            Show this help message");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut usage_path = None;
    let mut out_dir = PathBuf::from("data");
    let mut config_path = None;
    let mut csv_out = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--usage" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --usage requires a path argument");
                    process::exit(1);
                }
                usage_path = Some(PathBuf::from(&args[i]));
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a directory argument");
                    process::exit(1);
                }
                out_dir = PathBuf::from(&args[i]);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--csv" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv requires a path argument");
                    process::exit(1);
                }
                csv_out = Some(PathBuf::from(&args[i]));
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(usage_path) = usage_path else {
        eprintln!("error: --usage is required");
        print_help();
        process::exit(1);
    };

    CliArgs {
        usage_path,
        out_dir,
        config_path,
        csv_out,
    }
}

fn main() {
    let cli = parse_args();

    // Load config: --config file, otherwise the built-in defaults
    let config = if let Some(ref path) = cli.config_path {
        match AnalysisConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AnalysisConfig::default()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Load the full history once
    let readings = match store::load_usage(&cli.usage_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: failed to load usage data: {e}");
            process::exit(1);
        }
    };
    println!("Loaded {} usage records", readings.len());

    if readings
        .iter()
        .all(|r| r.date.is_empty() || r.nem_time.is_empty())
    {
        eprintln!("error: no reading carries a date and timestamp; nothing to analyze");
        process::exit(1);
    }

    let output = analysis::run(&readings, &config);
    println!("Processed {} days of data", output.daily_summaries.len());

    if let Err(e) = store::write_outputs(&output, &cli.out_dir) {
        eprintln!("error: failed to write result sets: {e}");
        process::exit(1);
    }
    println!("Result sets written to {}", cli.out_dir.display());

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&output.daily_summaries, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        println!("Daily summaries exported to {}", path.display());
    }

    println!("\n{}", RunReport(&output));
}
