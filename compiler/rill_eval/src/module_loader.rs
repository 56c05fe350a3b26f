//! Host hook for resolving `import` paths to source text.

use rustc_hash::FxHashMap;

use crate::Fault;

/// A resolved module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedModule {
    /// Identity used for de-duplication and cycle detection, e.g. a
    /// canonical file path.
    pub key: String,
    /// Directory the module's own imports resolve against.
    pub dir: String,
    pub source: String,
}

/// Resolves an import path relative to the importing frame's directory.
pub trait ModuleLoader {
    fn resolve(&self, base_dir: &str, path: &str) -> Result<LoadedModule, Fault>;
}

/// Loader over an in-memory table of `path -> source`.
///
/// Paths are joined onto the importer's directory and normalised, so a
/// module at `lib/a.rl` importing `"b.rl"` resolves to `lib/b.rl`.
#[derive(Default)]
pub struct MemoryLoader {
    modules: FxHashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_module(mut self, path: &str, source: impl Into<String>) -> Self {
        self.modules.insert(normalize(path), source.into());
        self
    }
}

impl ModuleLoader for MemoryLoader {
    fn resolve(&self, base_dir: &str, path: &str) -> Result<LoadedModule, Fault> {
        let key = if path.starts_with('/') {
            normalize(path)
        } else {
            normalize(&format!("{base_dir}/{path}"))
        };
        let source = self
            .modules
            .get(&key)
            .ok_or_else(|| Fault::import(format!("module `{path}` not found")))?;
        let dir = match key.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => key[..idx].to_string(),
            None => ".".to_string(),
        };
        Ok(LoadedModule {
            key,
            dir,
            source: source.clone(),
        })
    }
}

/// Collapse `.` and `..` segments and duplicate slashes.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
