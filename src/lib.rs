//! Naming and module resolution helpers for generator composition.
//!
//! - [`naming`] turns module names into aliases, fullnames and generator
//!   object paths.
//! - [`resolver`] finds installed modules locally or in the global module
//!   directory, and loads them through a caller-supplied [`ModuleLoader`].

pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `generate_util::naming` instead of `generate_util::core::naming`
pub use self::core::*;
