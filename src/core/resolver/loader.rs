//! The loader seam: turns a request into a loaded module value.

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::entry::resolve_entry;
use crate::error::{Error, Result};
use crate::utils::{io, path};

/// Loads a module given a request and the directory it is made from.
///
/// `request` is either a bare module name or a filesystem path. Implementors
/// report a module that is simply not there with [`Error::module_not_found`];
/// any other error means the module exists but could not be loaded, and
/// callers propagate it.
pub trait ModuleLoader {
    type Module: Clone;

    fn load(&self, request: &str, base_dir: &Path) -> Result<Self::Module>;
}

/// Loads JSON modules into `serde_json::Value`.
///
/// Path requests (absolute, `./`, `../`) resolve against `base_dir`. Bare
/// names are looked up in `node_modules` directories from `base_dir` upwards.
#[derive(Debug, Clone)]
pub struct JsonLoader {
    extensions: Vec<String>,
}

impl JsonLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    fn locate(&self, request: &str, base_dir: &Path) -> Option<PathBuf> {
        if is_path_request(request) {
            let target = path::resolve(base_dir, Path::new(request));
            return resolve_entry(&target, &self.extensions);
        }

        base_dir
            .ancestors()
            .map(|dir| dir.join("node_modules").join(request))
            .find_map(|candidate| resolve_entry(&candidate, &self.extensions))
    }
}

impl Default for JsonLoader {
    fn default() -> Self {
        Self {
            extensions: vec![".json".to_string()],
        }
    }
}

impl ModuleLoader for JsonLoader {
    type Module = Value;

    fn load(&self, request: &str, base_dir: &Path) -> Result<Value> {
        let filepath = self.locate(request, base_dir).ok_or_else(|| {
            Error::module_not_found(request, Some(base_dir.to_string_lossy().into_owned()))
        })?;

        let content = io::read_file(&filepath, "load module")?;
        serde_json::from_str(&content)
            .map_err(|e| Error::module_load_failed(filepath.to_string_lossy(), e.to_string()))
    }
}

fn is_path_request(request: &str) -> bool {
    Path::new(request).is_absolute()
        || request == "."
        || request == ".."
        || request.starts_with("./")
        || request.starts_with("../")
        || request.starts_with(".\\")
        || request.starts_with("..\\")
}
