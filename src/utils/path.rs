//! Lexical path helpers and the existence probe used by resolution.

use std::env;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

/// Process working directory, or `.` when it cannot be determined.
pub fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve `path` against `base` and normalize `.`/`..` segments without
/// touching the filesystem. Symlinks are not followed.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Resolve `path` against the process working directory.
pub fn absolute(path: &Path) -> PathBuf {
    resolve(&current_dir(), path)
}

pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// A path exists when it can be opened for reading. Directories count even
/// on platforms where opening one fails.
pub fn exists(path: &Path) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }
    File::open(path).is_ok() || path.is_dir()
}
