//! `egoframe` – command-line front end for the world-to-ego converter.
//!
//! Reads a scenario file (one ego pose plus world-frame queries), converts
//! every query into the ego frame and prints the results.
//!
//! ```text
//! egoframe convert <scenario.toml> [--json]
//! egoframe matrices <scenario.toml>
//! egoframe schema
//! egoframe init-config
//! egoframe help
//! ```

mod config;
mod scenario;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::Colorize;
use egoframe_transform::FrameConverter;
use tracing::{debug, info, warn};

use config::{Config, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Convert { path: PathBuf, json: bool },
    Matrices { path: PathBuf },
    Schema,
    InitConfig,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut it = args.iter().map(String::as_str);
    let cmd = match it.next() {
        None | Some("help" | "--help" | "-h") => return Ok(Command::Help),
        Some(c) => c,
    };
    let rest: Vec<&str> = it.collect();

    match cmd {
        "convert" => {
            let json = rest.contains(&"--json");
            let mut paths = rest.iter().filter(|a| !a.starts_with("--"));
            let path = paths
                .next()
                .ok_or_else(|| "convert: missing <scenario.toml>".to_string())?;
            if let Some(unknown) = rest.iter().find(|a| a.starts_with("--") && **a != "--json") {
                return Err(format!("convert: unknown flag '{unknown}'"));
            }
            if paths.next().is_some() {
                return Err("convert: expected a single scenario file".to_string());
            }
            Ok(Command::Convert { path: PathBuf::from(*path), json })
        }
        "matrices" => match rest.as_slice() {
            [path] => Ok(Command::Matrices { path: PathBuf::from(*path) }),
            _ => Err("matrices: expected a single scenario file".to_string()),
        },
        "schema" => Ok(Command::Schema),
        "init-config" => Ok(Command::InitConfig),
        other => Err(format!("unknown command '{other}' (try `egoframe help`)")),
    }
}

fn main() -> ExitCode {
    let _guard = telemetry::init_tracing("egoframe");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cmd: Command) -> Result<(), String> {
    debug!(?cmd, "dispatching");
    match cmd {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Schema => {
            println!("{}", scenario::schema_json()?);
            Ok(())
        }
        Command::InitConfig => {
            let path = config::save(&Config::default())?;
            println!("{} Config saved to {}", "✓".green().bold(), path.display().to_string().bold());
            Ok(())
        }
        Command::Convert { path, json } => {
            let cfg = config_for_output(json, config::load())?;
            let (scene, converter) = load_converter(&path)?;
            let results = scenario::convert_all(&converter, &scene.queries);
            info!(queries = results.len(), path = %path.display(), "converted scenario");

            let format = if json { OutputFormat::Json } else { cfg.output_format };
            match format {
                OutputFormat::Json => {
                    let out = serde_json::to_string_pretty(&results)
                        .map_err(|e| format!("Failed to serialize results: {e}"))?;
                    println!("{out}");
                }
                OutputFormat::Table => print_table(&results, cfg.precision),
            }
            Ok(())
        }
        Command::Matrices { path } => {
            let cfg = config::load()?;
            let (_, converter) = load_converter(&path)?;
            let p = cfg.precision;

            println!("{}", "world → ego rotation".bold().cyan());
            for row in converter.rotation_matrix().rows() {
                println!("  {}", format_row(&row, p));
            }
            println!("{}", "world → ego homogeneous transform".bold().cyan());
            for row in converter.homogeneous_transform().rows() {
                println!("  {}", format_row(&row, p));
            }
            Ok(())
        }
    }
}

/// With `--json` the config only supplies table settings, so a broken
/// config file is logged and replaced by defaults instead of failing.
fn config_for_output(json: bool, loaded: Result<Config, String>) -> Result<Config, String> {
    match loaded {
        Err(e) if json => {
            warn!(error = %e, "ignoring unreadable config for --json output");
            Ok(Config::default())
        }
        other => other,
    }
}

fn load_converter(path: &Path) -> Result<(scenario::Scenario, FrameConverter), String> {
    let scene = scenario::load(path).map_err(|e| e.to_string())?;
    let converter = FrameConverter::new(scene.pose).map_err(|e| e.to_string())?;
    Ok((scene, converter))
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

fn format_row(values: &[f64], precision: usize) -> String {
    let precision = precision.min(config::MAX_PRECISION);
    let width = precision.saturating_add(6);
    values
        .iter()
        .map(|v| format!("{v:>width$.precision$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_table(results: &[scenario::Converted], precision: usize) {
    if results.is_empty() {
        println!("  {}", "No queries in scenario.".dimmed());
        return;
    }
    println!(
        "  {:<16} {:<7} {:<32} {}",
        "name".bold(),
        "kind".bold(),
        "world (x, y, z)".bold(),
        "ego (x, y, z)".bold()
    );
    for r in results {
        let world = format_row(&[r.world.x, r.world.y, r.world.z], precision);
        let kind = match r.kind {
            scenario::QueryKind::Point => "point",
            scenario::QueryKind::Vector => "vector",
        };
        println!(
            "  {:<16} {:<7} {:<32} {}",
            r.name,
            kind,
            world,
            format_row(&r.ego, precision).green()
        );
    }
}

fn print_help() {
    println!();
    println!("  {} {}", "egoframe".bold(), format!("v{}", env!("CARGO_PKG_VERSION")).dimmed());
    println!("  World-to-ego coordinate conversion");
    println!();
    println!("  {}", "Commands".bold().cyan());
    println!("    convert <scenario.toml> [--json]  Convert every query in the scenario");
    println!("    matrices <scenario.toml>          Print the derived matrices");
    println!("    schema                            Print the scenario JSON Schema");
    println!("    init-config                       Write ~/.egoframe/config.toml with defaults");
    println!("    help                              Show this message");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_is_help() {
        assert_eq!(parse_args(&[]), Ok(Command::Help));
        assert_eq!(parse_args(&args(&["-h"])), Ok(Command::Help));
    }

    #[test]
    fn convert_with_json_flag_in_any_position() {
        let expected = Command::Convert { path: PathBuf::from("s.toml"), json: true };
        assert_eq!(parse_args(&args(&["convert", "s.toml", "--json"])), Ok(expected.clone()));
        assert_eq!(parse_args(&args(&["convert", "--json", "s.toml"])), Ok(expected));
    }

    #[test]
    fn convert_requires_a_path() {
        assert!(parse_args(&args(&["convert"])).is_err());
        assert!(parse_args(&args(&["convert", "--json"])).is_err());
    }

    #[test]
    fn convert_rejects_unknown_flag_and_extra_paths() {
        assert!(parse_args(&args(&["convert", "s.toml", "--yaml"])).is_err());
        assert!(parse_args(&args(&["convert", "a.toml", "b.toml"])).is_err());
    }

    #[test]
    fn matrices_takes_exactly_one_path() {
        assert_eq!(
            parse_args(&args(&["matrices", "s.toml"])),
            Ok(Command::Matrices { path: PathBuf::from("s.toml") })
        );
        assert!(parse_args(&args(&["matrices"])).is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_args(&args(&["frobnicate"])).unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn format_row_caps_huge_precision() {
        let capped = format_row(&[1.0], usize::MAX);
        assert_eq!(capped, format_row(&[1.0], config::MAX_PRECISION));
        assert_eq!(capped.trim(), "1.00000000000000000");
    }

    #[test]
    fn json_output_survives_broken_config() {
        let broken = Err("Failed to parse config: bad".to_string());
        assert_eq!(config_for_output(true, broken), Ok(Config::default()));
    }

    #[test]
    fn table_output_reports_broken_config() {
        let broken = Err("Failed to parse config: bad".to_string());
        assert!(config_for_output(false, broken).is_err());
    }

    #[test]
    fn format_row_respects_precision() {
        assert_eq!(format_row(&[1.0, -0.5], 2), "    1.00    -0.50");
    }
}
