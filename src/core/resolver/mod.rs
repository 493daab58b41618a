//! Two-tier module lookup (local, then global) with memoization.
//!
//! Lookups never fail: a module that cannot be found is `None`. Every hit is
//! cached for the lifetime of the resolver and served from the cache even if
//! the filesystem changes afterwards. Misses are not cached.

mod entry;
mod loader;
mod registry;

pub use entry::resolve_entry;
pub use loader::{JsonLoader, ModuleLoader};
pub use registry::ModuleRegistry;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::config::{ResolveOptions, ResolverConfig};
use crate::error::Result;
use crate::naming;
use crate::utils::path;

/// Resolved paths, keyed by request.
#[derive(Debug, Clone, Default)]
pub struct ResolveCache {
    local: HashMap<String, PathBuf>,
    global: HashMap<String, PathBuf>,
    /// Entry points found with global fallback allowed, keyed by
    /// `name::configfile`.
    entries: HashMap<String, PathBuf>,
    /// Entry points found with an explicit `cwd`. Never holds a global hit.
    pinned_entries: HashMap<String, PathBuf>,
}

impl ResolveCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached paths across all lookup tiers.
    pub fn len(&self) -> usize {
        self.local.len() + self.global.len() + self.entries.len() + self.pinned_entries.len()
    }

    /// True when nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries_for(&mut self, options: &ResolveOptions) -> &mut HashMap<String, PathBuf> {
        if options.cwd.is_some() {
            &mut self.pinned_entries
        } else {
            &mut self.entries
        }
    }
}

#[derive(Debug)]
pub struct ModuleResolver {
    global_modules: PathBuf,
    extensions: Vec<String>,
    cache: ResolveCache,
}

impl ModuleResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        Ok(Self::with_cache(
            config.global_modules_dir()?,
            config.extensions.clone(),
            ResolveCache::new(),
        ))
    }

    /// Build a resolver around an existing cache, e.g. one carried over from
    /// a previous resolver via [`ModuleResolver::into_cache`].
    pub fn with_cache(
        global_modules: impl Into<PathBuf>,
        extensions: Vec<String>,
        cache: ResolveCache,
    ) -> Self {
        Self {
            global_modules: global_modules.into(),
            extensions,
            cache,
        }
    }

    pub fn global_modules(&self) -> &Path {
        &self.global_modules
    }

    pub fn cache(&self) -> &ResolveCache {
        &self.cache
    }

    pub fn into_cache(self) -> ResolveCache {
        self.cache
    }

    /// Resolve `name` from the working directory.
    ///
    /// Tries, in order: `name` as a path from the process working directory,
    /// `name` relative to `options.cwd`, and `node_modules/<fullname>` under
    /// `options.cwd`.
    pub fn resolve_local(&mut self, name: &str, options: &ResolveOptions) -> Option<PathBuf> {
        if let Some(hit) = self.cache.local.get(name) {
            trace!(name, path = %hit.display(), "local cache hit");
            return Some(hit.clone());
        }

        let found = find_local(name, options)?;
        debug!(name, path = %found.display(), "resolved locally");
        self.cache.local.insert(name.to_string(), found.clone());
        Some(found)
    }

    /// Resolve `name` from the global module directory, trying the prefixed
    /// fullname second.
    pub fn resolve_global(&mut self, name: &str, options: &ResolveOptions) -> Option<PathBuf> {
        if let Some(hit) = self.cache.global.get(name) {
            trace!(name, path = %hit.display(), "global cache hit");
            return Some(hit.clone());
        }

        let found = self.find_global(name, options)?;
        debug!(name, path = %found.display(), "resolved from global modules");
        self.cache.global.insert(name.to_string(), found.clone());
        Some(found)
    }

    /// Local lookup first. Global lookup only when the caller did not pin
    /// the search to an explicit `cwd`.
    pub fn resolve_module(&mut self, name: &str, options: &ResolveOptions) -> Option<PathBuf> {
        if let Some(found) = self.resolve_local(name, options) {
            return Some(found);
        }
        if options.cwd.is_some() {
            trace!(name, "cwd given, skipping global modules");
            return None;
        }
        self.resolve_global(name, options)
    }

    /// Resolve `name` to a loadable file.
    ///
    /// The module path comes from [`resolve_module`](Self::resolve_module)
    /// and is turned into an entry point; a directory with no entry point
    /// falls back to `<dir>/<configfile>`.
    pub fn try_resolve(&mut self, name: &str, options: &ResolveOptions) -> Option<PathBuf> {
        let key = format!("{}::{}", name, options.configfile);
        if let Some(hit) = self.cache.entries_for(options).get(&key) {
            trace!(key = %key, path = %hit.display(), "entry cache hit");
            return Some(hit.clone());
        }

        debug!(name, configfile = %options.configfile, "try_resolve");
        let candidate = self.resolve_module(name, options)?;
        if !path::exists(&candidate) {
            debug!(name, path = %candidate.display(), "resolved path no longer exists");
            return None;
        }

        let resolved = match resolve_entry(&candidate, &self.extensions) {
            Some(entry) => entry,
            None => {
                let fallback = candidate.join(&options.configfile);
                if !path::exists(&fallback) {
                    return None;
                }
                fallback
            }
        };

        self.cache.entries_for(options).insert(key, resolved.clone());
        Some(resolved)
    }

    fn find_global(&self, name: &str, options: &ResolveOptions) -> Option<PathBuf> {
        let filepath = path::resolve(&self.global_modules, Path::new(name));
        if path::exists(&filepath) {
            return Some(filepath);
        }

        let prefix = options.prefix.as_deref()?;
        let fullname = naming::join_prefix(name, prefix);
        if fullname == name {
            return None;
        }

        let filepath = path::resolve(&self.global_modules, Path::new(&fullname));
        path::exists(&filepath).then_some(filepath)
    }
}

fn find_local(name: &str, options: &ResolveOptions) -> Option<PathBuf> {
    let as_given = Path::new(name);
    if path::exists(as_given) {
        return Some(path::absolute(as_given));
    }

    let cwd = options.base_dir();
    let filepath = path::resolve(&cwd, as_given);
    if path::exists(&filepath) {
        return Some(filepath);
    }

    let fullname = match options.prefix.as_deref() {
        Some(prefix) => naming::join_prefix(name, prefix),
        None => name.to_string(),
    };
    let filepath = path::resolve(&cwd, &Path::new("node_modules").join(fullname));
    path::exists(&filepath).then_some(filepath)
}
