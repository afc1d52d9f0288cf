//! Tonemend CLI - Command-line interface for stimulus generation
//!
//! This binary resolves target frequencies to bands and renders the active
//! and sham stimulus files.

mod cli_args;

use std::process::ExitCode;

use clap::Parser;
use tonemend_cli::commands::{self, generate::GenerateOptions, EXIT_INVALID_INPUT};
use tonemend_cli::input::RequestOverrides;
use tonemend_cli::logging;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_INVALID_INPUT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            frequency,
            mode,
            minutes,
            active_alternate,
            sham_alternate,
            sham,
            seed,
            request,
            out_dir,
            preview_seconds,
            json,
        } => commands::generate::run(&GenerateOptions {
            request_file: request.as_deref(),
            overrides: RequestOverrides {
                frequency,
                mode,
                minutes,
                active_alternate,
                sham_alternate,
                sham,
                seed,
            },
            out_dir: out_dir.as_deref(),
            preview_seconds,
            json,
        }),
        Commands::Bands { json } => commands::bands::run(json),
        Commands::Resolve {
            frequency,
            active_alternate,
            sham_alternate,
            json,
        } => commands::resolve::run(frequency, active_alternate, sham_alternate, json),
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(commands::exit_code_for(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonemend_spec::ModulationMode;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "tonemend",
            "generate",
            "--frequency",
            "4800",
            "--mode",
            "amplitude",
            "--minutes",
            "30",
            "--sham",
            "--seed",
            "9",
            "-o",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                frequency,
                mode,
                minutes,
                sham,
                seed,
                out_dir,
                json,
                ..
            } => {
                assert_eq!(frequency, Some(4800.0));
                assert_eq!(mode, Some(ModulationMode::Amplitude));
                assert_eq!(minutes, Some(30));
                assert!(sham);
                assert_eq!(seed, Some(9));
                assert_eq!(out_dir.unwrap().to_str(), Some("out"));
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let parsed = Cli::try_parse_from(["tonemend", "generate", "-f", "1000", "-m", "chirp"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_parses_inspect_and_verbosity() {
        let cli = Cli::try_parse_from(["tonemend", "-vv", "inspect", "a.wav", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Inspect { file, json } => {
                assert_eq!(file.to_str(), Some("a.wav"));
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_parses_resolve() {
        let cli = Cli::try_parse_from([
            "tonemend",
            "resolve",
            "--frequency",
            "4800",
            "--active-alternate",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve {
                frequency,
                active_alternate,
                sham_alternate,
                json,
            } => {
                assert_eq!(frequency, 4800.0);
                assert!(active_alternate);
                assert!(!sham_alternate);
                assert!(!json);
            }
            _ => panic!("expected resolve command"),
        }
    }
}
