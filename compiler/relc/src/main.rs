//! relc: release-protocol generator CLI.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use relc::commands::{explain_error, generate_file, plan_file, write_markers, GenerateOptions};
use relc::DriverError;

fn main() {
    relc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    match command.as_str() {
        "generate" => {
            let Some(path) = first_positional(&args[2..]) else {
                eprintln!("Usage: relc generate <models.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --out=<dir>             Write one file per class into <dir>");
                eprintln!("  --config=<file>         Load generator configuration (JSON)");
                eprintln!("  --no-parallel           Generate classes sequentially");
                eprintln!("  --format=<fmt>          Diagnostics: terminal (default), json");
                eprintln!("  --color=<mode>          Colors: auto (default), always, never");
                eprintln!("  --no-async-interface    Target has no async release interface");
                eprintln!("  --no-docs               Omit documentation comments");
                std::process::exit(1);
            };
            let mut options = exit_on_error(GenerateOptions::parse(&args[2..]));
            options.is_tty = stderr.is_terminal();

            let summary = exit_on_error(generate_file(&path, &options, &mut stdout, &mut stderr));
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        "plan" => {
            let Some(path) = first_positional(&args[2..]) else {
                eprintln!("Usage: relc plan <models.json> [--config=<file>]");
                std::process::exit(1);
            };
            let config = config_option(&args[2..]);
            let summary = exit_on_error(plan_file(
                &path,
                config.as_deref(),
                &mut stdout,
                &mut stderr,
            ));
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        "markers" => {
            let out_dir = args[2..]
                .iter()
                .find_map(|arg| arg.strip_prefix("--out="))
                .map(PathBuf::from);
            let config = config_option(&args[2..]);
            exit_on_error(write_markers(
                out_dir.as_deref(),
                config.as_deref(),
                &mut stdout,
            ));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("relc {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: relc explain <CODE>");
                eprintln!("Example: relc explain E1002");
                std::process::exit(1);
            }
            if let Err(e) = explain_error(&args[2], &mut stdout) {
                eprintln!("error: {e}");
                eprintln!();
                eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings).");
                eprintln!("Examples: E1001, E2001, W1002");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// First argument that is not an option.
fn first_positional(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .find(|arg| !arg.starts_with('-'))
        .map(PathBuf::from)
}

fn config_option(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .find_map(|arg| arg.strip_prefix("--config="))
        .map(PathBuf::from)
}

fn exit_on_error<T>(result: Result<T, DriverError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("relc: release-protocol generator");
    println!();
    println!("Usage: relc <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <models.json>  Generate release protocols for every class");
    println!("  plan <models.json>      Show derived plans without emitting source");
    println!("  markers                 Emit the marker attribute declarations");
    println!("  explain <code>          Explain a diagnostic code (e.g., E1002)");
    println!("  help                    Show this help message");
    println!("  version                 Show version information");
    println!();
    println!("Generate options:");
    println!("  --out=<dir>             Write one file per class into <dir>");
    println!("  --config=<file>         Load generator configuration (JSON)");
    println!("  --no-parallel           Generate classes sequentially");
    println!("  --format=<fmt>          Diagnostics: terminal (default), json");
    println!("  --color=<mode>          Colors: auto (default), always, never");
    println!("  --no-async-interface    Target has no async release interface");
    println!("  --no-docs               Omit documentation comments");
    println!();
    println!("Markers options:");
    println!("  --out=<dir>             Write one file per marker into <dir>");
    println!("  --config=<file>         Take the marker namespace from <file>");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=rel_codegen=debug relc generate models.json");
    println!();
    println!("Examples:");
    println!("  relc generate models.json --out=obj/gen");
    println!("  relc generate models.json --format=json --no-parallel");
    println!("  relc plan models.json");
    println!("  relc markers --out=obj/gen");
    println!("  relc explain E1001");
}
