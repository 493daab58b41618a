//! Locate-then-load on top of the resolver, with a cache of loaded modules.

use std::collections::HashMap;
use tracing::{debug, trace};

use super::{ModuleLoader, ModuleResolver};
use crate::config::ResolveOptions;
use crate::error::Result;

/// Resolver plus loader, with a cache of loaded modules keyed by the name
/// they were requested under.
pub struct ModuleRegistry<L: ModuleLoader> {
    resolver: ModuleResolver,
    loader: L,
    loaded: HashMap<String, L::Module>,
}

impl<L: ModuleLoader> ModuleRegistry<L> {
    pub fn new(resolver: ModuleResolver, loader: L) -> Self {
        Self {
            resolver,
            loader,
            loaded: HashMap::new(),
        }
    }

    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut ModuleResolver {
        &mut self.resolver
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Load `name`, returning `Ok(None)` when it cannot be found.
    ///
    /// The loader gets `name` as-is first. If it reports the module as not
    /// found, `name` goes through [`ModuleResolver::try_resolve`] and the
    /// resolved file is loaded instead. Errors other than "not found"
    /// propagate.
    pub fn try_require(
        &mut self,
        name: &str,
        options: &ResolveOptions,
    ) -> Result<Option<L::Module>> {
        if let Some(module) = self.loaded.get(name) {
            trace!(name, "require cache hit");
            return Ok(Some(module.clone()));
        }

        let base_dir = options.base_dir();
        let module = match absent_as_none(self.loader.load(name, &base_dir))? {
            Some(module) => Some(module),
            None => {
                debug!(name, "not loadable directly, resolving");
                match self.resolver.try_resolve(name, options) {
                    Some(filepath) => {
                        let request = filepath.to_string_lossy();
                        absent_as_none(self.loader.load(&request, &base_dir))?
                    }
                    None => None,
                }
            }
        };

        if let Some(module) = &module {
            self.loaded.insert(name.to_string(), module.clone());
        }
        Ok(module)
    }
}

fn absent_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
