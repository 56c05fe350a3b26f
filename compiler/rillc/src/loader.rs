//! Module loading from the file system.

use std::io;
use std::path::{Path, PathBuf};

use rill_eval::{Fault, LoadedModule, ModuleLoader};
use tracing::debug;

/// Resolves `import` paths against the importing file's directory.
///
/// Modules are keyed by canonical path, so two spellings of the same file
/// (`./util.rl`, `lib/../util.rl`) load it once. A path without an extension
/// falls back to `<path>.rl` when no such file exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl FsLoader {
    pub fn new() -> Self {
        FsLoader
    }

    fn locate(base_dir: &str, path: &str) -> PathBuf {
        let candidate = Path::new(base_dir).join(path);
        if candidate.extension().is_none() && !candidate.exists() {
            return candidate.with_extension("rl");
        }
        candidate
    }
}

impl ModuleLoader for FsLoader {
    fn resolve(&self, base_dir: &str, path: &str) -> Result<LoadedModule, Fault> {
        let candidate = Self::locate(base_dir, path);
        let canonical = std::fs::canonicalize(&candidate).map_err(|err| read_error(path, &err))?;
        let source = std::fs::read_to_string(&canonical).map_err(|err| read_error(path, &err))?;
        let dir = canonical
            .parent()
            .map_or_else(|| ".".to_string(), |dir| dir.display().to_string());
        debug!(path, key = %canonical.display(), "resolved module");
        Ok(LoadedModule {
            key: canonical.display().to_string(),
            dir,
            source,
        })
    }
}

#[cold]
fn read_error(path: &str, err: &io::Error) -> Fault {
    let message = match err.kind() {
        io::ErrorKind::NotFound => format!("module `{path}` not found"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading `{path}`"),
        io::ErrorKind::InvalidData => format!("`{path}` contains invalid UTF-8 data"),
        _ => format!("error reading `{path}`: {err}"),
    };
    Fault::import(message)
}
