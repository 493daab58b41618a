// Public modules
pub mod config;
pub mod error;
pub mod naming;
pub mod paths;
pub mod resolver;

// Internal modules - not part of public API
pub(crate) mod config_loader;

// Re-export common types for convenience
pub use config::{AliasFn, ResolveOptions, ResolverConfig};
pub use error::{Error, ErrorCode, Result};
pub use naming::{to_alias, to_fullname, to_generator_path};
pub use resolver::{JsonLoader, ModuleLoader, ModuleRegistry, ModuleResolver, ResolveCache};
