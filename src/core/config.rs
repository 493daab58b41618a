use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::paths;
use crate::utils::io;

/// Custom alias function, used by `to_alias` in place of prefix stripping.
pub type AliasFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Per-call options for naming and resolution.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Namespace prefix used to build fullnames (`generate` -> `generate-foo`).
    #[serde(default)]
    pub prefix: Option<String>,

    /// Fallback for `prefix` when naming.
    #[serde(default)]
    pub modulename: Option<String>,

    /// Base directory for local search. `None` means the caller did not
    /// restrict the search, so global lookup is allowed.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// File appended to a resolved directory that has no loadable entry point.
    #[serde(default = "default_configfile")]
    pub configfile: String,

    #[serde(skip)]
    pub alias: Option<AliasFn>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn modulename(mut self, modulename: impl Into<String>) -> Self {
        self.modulename = Some(modulename.into());
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn configfile(mut self, configfile: impl Into<String>) -> Self {
        self.configfile = configfile.into();
        self
    }

    pub fn alias<F>(mut self, alias: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.alias = Some(Arc::new(alias));
        self
    }

    /// `prefix`, falling back to `modulename`.
    pub fn effective_prefix(&self) -> Option<&str> {
        self.prefix.as_deref().or(self.modulename.as_deref())
    }

    /// Directory local lookups are relative to.
    pub fn base_dir(&self) -> PathBuf {
        match &self.cwd {
            Some(cwd) => crate::utils::path::absolute(cwd),
            None => crate::utils::path::current_dir(),
        }
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            modulename: None,
            cwd: None,
            configfile: default_configfile(),
            alias: None,
        }
    }
}

impl fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("prefix", &self.prefix)
            .field("modulename", &self.modulename)
            .field("cwd", &self.cwd)
            .field("configfile", &self.configfile)
            .field("alias", &self.alias.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn default_configfile() -> String {
    "generator.js".to_string()
}

/// Resolver-wide settings, usually read once from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Global module directory. Platform default when absent.
    #[serde(default)]
    pub global_modules: Option<PathBuf>,

    /// Extensions tried when resolving an entry point.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            global_modules: None,
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string()]
}

impl ResolverConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_file(path, "read resolver config")?;
        serde_json::from_str(&content)
            .map_err(|e| Error::config_invalid_json(path.to_string_lossy(), e))
    }

    pub fn global_modules_dir(&self) -> Result<PathBuf> {
        match &self.global_modules {
            Some(dir) => Ok(dir.clone()),
            None => paths::global_modules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn options_default_configfile_is_generator_js() {
        let opts = ResolveOptions::new();
        assert_eq!(opts.configfile, "generator.js");
        assert!(opts.cwd.is_none());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: ResolveOptions =
            serde_json::from_str(r#"{"prefix": "generate", "cwd": "fixtures"}"#).unwrap();
        assert_eq!(opts.prefix.as_deref(), Some("generate"));
        assert_eq!(opts.cwd, Some(PathBuf::from("fixtures")));
        assert_eq!(opts.configfile, "generator.js");
        assert!(opts.alias.is_none());
    }

    #[test]
    fn effective_prefix_falls_back_to_modulename() {
        let opts = ResolveOptions::new().modulename("verb");
        assert_eq!(opts.effective_prefix(), Some("verb"));

        let opts = opts.prefix("generate");
        assert_eq!(opts.effective_prefix(), Some("generate"));
    }

    #[test]
    fn resolver_config_loads_from_json() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, r#"{{"globalModules": "/opt/node_modules"}}"#).unwrap();

        let config = ResolverConfig::load(temp.path()).unwrap();
        assert_eq!(config.global_modules, Some(PathBuf::from("/opt/node_modules")));
        assert_eq!(config.extensions, vec![".js", ".json"]);
        assert_eq!(
            config.global_modules_dir().unwrap(),
            PathBuf::from("/opt/node_modules")
        );
    }

    #[test]
    fn resolver_config_rejects_invalid_json() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "{{ not json").unwrap();

        let err = ResolverConfig::load(temp.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }
}
