//! The `run` command: parse and evaluate a Rill source file.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use rill_eval::{
    stdout_handler, FaultKind, Interpreter, LimiterConfig, RunError, SharedPrintHandler, Value,
};
use tracing::debug;

use super::{read_file, syntax_error_line};
use crate::{install_prelude, FsLoader};

/// Options accepted by `rill run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub limits: LimiterConfig,
}

/// Parse `run` flags. Anything that is not a recognised flag is left to the
/// caller (the file path).
///
/// Returns the first malformed flag as an error message.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();

    for arg in args {
        if let Some(n) = arg.strip_prefix("--max-iterations=") {
            let max = n
                .parse()
                .map_err(|_| format!("invalid --max-iterations value '{n}'"))?;
            options.limits = options.limits.with_max_iterations(max);
        } else if let Some(n) = arg.strip_prefix("--max-depth=") {
            let max = n
                .parse()
                .map_err(|_| format!("invalid --max-depth value '{n}'"))?;
            options.limits = options.limits.with_max_depth(max);
        } else if let Some(secs) = arg.strip_prefix("--timeout=") {
            let timeout = secs
                .parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| format!("invalid --timeout value '{secs}'"))?;
            options.limits = options.limits.with_max_duration(timeout);
        } else if arg == "--no-limits" {
            options.limits = options.limits.with_enabled(false);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    Ok(options)
}

/// Run a source file, printing any error to stderr and exiting with status 1.
///
/// If the program defines `main`, it is called after the top level has run
/// and a non-nil result is printed.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_file(path);
    match execute(&content, Path::new(path), options, stdout_handler()) {
        Ok(Some(value)) if !value.is_nil() => println!("{value}"),
        Ok(_) => {}
        Err(err) => {
            eprint!("{}", render_error(path, &err));
            std::process::exit(1);
        }
    }
}

/// Evaluate `source` as if read from `path`: imports resolve against the
/// file's directory and output goes to `print_handler`.
///
/// Returns the result of `main()` when the program defines one.
pub fn execute(
    source: &str,
    path: &Path,
    options: &RunOptions,
    print_handler: SharedPrintHandler,
) -> Result<Option<Value>, RunError> {
    let base_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.display().to_string(),
        _ => ".".to_string(),
    };
    debug!(path = %path.display(), %base_dir, "running file");

    let interp = Interpreter::builder()
        .limits(options.limits.clone())
        .loader(FsLoader::new())
        .print_handler(print_handler)
        .base_dir(base_dir.as_str())
        .build();
    install_prelude(interp.globals());

    let program = rill_parse::parse_with_base_dir(source, &base_dir)?;
    interp.run(&program)?;
    Ok(interp.run_main()?)
}

/// Format a failed run for the terminal.
///
/// Parse errors take one `line:column: error: message` line. Faults get an
/// `error:` line, a hint for limiter breaches, then the call backtrace
/// innermost first.
pub fn render_error(path: &str, err: &RunError) -> String {
    let mut out = String::new();
    match err {
        RunError::Parse(err) => {
            let _ = writeln!(out, "{}", syntax_error_line(err));
        }
        RunError::Fault(fault) => {
            match fault.position {
                Some(pos) => {
                    let _ = writeln!(out, "error: {path}:{pos}: {}", fault.message);
                }
                None => {
                    let _ = writeln!(out, "error: {path}: {}", fault.message);
                }
            }
            if let FaultKind::LimitExceeded(breach) = &fault.kind {
                let _ = writeln!(out, "  hint: {}", breach.hint);
            }
            for frame in &fault.backtrace {
                let _ = writeln!(out, "  at {frame}");
            }
        }
    }
    out
}
