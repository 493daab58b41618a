//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `path` - Lexical path resolution and the existence probe

pub mod io;
pub mod path;
