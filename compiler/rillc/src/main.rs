//! Rill CLI

use rillc::commands::{lex_file, parse_file, parse_run_options, run_file};
use rillc::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let Some(path) = args.iter().skip(2).find(|arg| !arg.starts_with('-')) else {
                eprintln!("error: missing file path");
                print_run_usage();
                std::process::exit(1);
            };
            let options = match parse_run_options(&args[2..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    print_run_usage();
                    std::process::exit(1);
                }
            };
            run_file(path, &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: rill lex <file.rl>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: rill parse <file.rl>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Rill {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.rl` path runs it with default limits.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("rl"))
            {
                run_file(command, &rillc::commands::RunOptions::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Rill scripting language");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.rl>      Run a Rill program");
    println!("  lex <file.rl>      Tokenize and display tokens");
    println!("  parse <file.rl>    Parse and print the syntax tree");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  RILL_LOG           Tracing filter, e.g. rill_eval=debug");
    println!("  RILL_LOG_TREE      Render spans as an indented tree");
}

fn print_run_usage() {
    eprintln!("Usage: rill run <file.rl> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --max-iterations=N   Loop iterations allowed per run (default 1000000)");
    eprintln!("  --max-depth=N        Maximum call depth (default 1000)");
    eprintln!("  --timeout=SECS       Wall-clock budget in seconds (default 30)");
    eprintln!("  --no-limits          Disable the execution limiter");
}
