//! Strict loading of an explicitly named config file.
//!
//! Unlike the resolver, a missing file here is an error: the caller named it.

use std::path::Path;
use tracing::debug;

use crate::config::ResolveOptions;
use crate::error::{Error, Result};
use crate::resolver::{ModuleLoader, ModuleRegistry};
use crate::utils::path;

impl<L: ModuleLoader> ModuleRegistry<L> {
    /// Load `configfile`, resolved against `options.cwd` (or the process
    /// working directory).
    pub fn load_config(
        &mut self,
        configfile: &str,
        options: &ResolveOptions,
    ) -> Result<L::Module> {
        let filepath = path::resolve(&options.base_dir(), Path::new(configfile));
        if !path::exists(&filepath) {
            return Err(Error::config_not_found(filepath.to_string_lossy()));
        }

        debug!(path = %filepath.display(), "loading config");
        let name = filepath.to_string_lossy().into_owned();
        self.try_require(&name, options)?
            .ok_or_else(|| Error::module_not_found(name, None))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ResolveOptions;
    use crate::resolver::{JsonLoader, ModuleRegistry, ModuleResolver, ResolveCache};
    use std::fs;
    use tempfile::TempDir;

    fn registry(global: &std::path::Path) -> ModuleRegistry<JsonLoader> {
        let resolver = ModuleResolver::with_cache(global, Vec::new(), ResolveCache::new());
        ModuleRegistry::new(resolver, JsonLoader::new())
    }

    #[test]
    fn loads_config_relative_to_cwd() {
        let cwd = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(cwd.path().join("generator.json"), r#"{"tasks": ["default"]}"#).unwrap();

        let mut reg = registry(global.path());
        let opts = ResolveOptions::new().cwd(cwd.path());
        let config = reg.load_config("generator.json", &opts).unwrap();
        assert_eq!(config["tasks"][0], "default");
    }

    #[test]
    fn missing_config_is_an_error() {
        let cwd = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let mut reg = registry(global.path());
        let opts = ResolveOptions::new().cwd(cwd.path());
        let err = reg.load_config("generator.json", &opts).unwrap_err();
        assert_eq!(err.code.as_str(), "config.not_found");
        assert_eq!(
            err.details["path"],
            cwd.path().join("generator.json").to_string_lossy().into_owned()
        );
    }

    #[test]
    fn broken_config_propagates_load_failure() {
        let cwd = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(cwd.path().join("generator.json"), "{ broken").unwrap();

        let mut reg = registry(global.path());
        let opts = ResolveOptions::new().cwd(cwd.path());
        let err = reg.load_config("generator.json", &opts).unwrap_err();
        assert_eq!(err.code.as_str(), "module.load_failed");
    }
}
