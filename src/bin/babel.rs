//! Command-line interface for babel
//! This binary is used to inspect how babel files are tokenized.
//!
//! Usage:
//!   babel tokens `<path>` [--format `<format>`] [--locations]  - Print the token stream of a file
//!
//! Logging is controlled by `RUST_LOG` (defaults to `warn`).

use babel::babel::lexer::{lex, render, render_with_locations, Lexed};
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    init_tracing();

    let matches = Command::new("babel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting babel interface definitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a babel file")
                .arg(
                    Arg::new("path")
                        .help("Path to the babel file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["text", "json", "yaml"])
                        .default_value("text"),
                )
                .arg(
                    Arg::new("locations")
                        .long("locations")
                        .short('l')
                        .help("Prefix each token with line:position (text format only)")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or_default();
            let format = tokens_matches
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("text");
            let locations = tokens_matches.get_flag("locations");
            handle_tokens_command(path, format, locations);
        }
        _ => unreachable!(),
    }
}

/// Install a subscriber reading its filter from `RUST_LOG`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str, locations: bool) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    let Lexed {
        tokens,
        diagnostics,
    } = lex(&source).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    });

    let output = match format {
        "json" => serde_json::to_string_pretty(&tokens).map_err(|e| e.to_string()),
        "yaml" => serde_yaml::to_string(&tokens).map_err(|e| e.to_string()),
        _ if locations => Ok(render_with_locations(&tokens)),
        _ => Ok(render(&tokens)),
    };

    match output {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }
    }

    if !diagnostics.is_empty() {
        eprintln!("{} issue(s) in {}", diagnostics.len(), path);
    }
}
