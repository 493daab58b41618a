//! Entry-point resolution for a located module path.
//!
//! A candidate resolves to itself when it is a file, then to the file with
//! each configured extension appended. Directories resolve through the
//! `main` field of their `package.json`, then to `index` plus an extension.

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::{io, path};

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    main: Option<String>,
}

pub fn resolve_entry(candidate: &Path, extensions: &[String]) -> Option<PathBuf> {
    if let Some(file) = resolve_as_file(candidate, extensions) {
        return Some(file);
    }
    if candidate.is_dir() {
        return resolve_as_directory(candidate, extensions);
    }
    None
}

fn resolve_as_file(candidate: &Path, extensions: &[String]) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    extensions
        .iter()
        .map(|ext| with_appended_extension(candidate, ext))
        .find(|p| p.is_file())
}

fn resolve_as_directory(dir: &Path, extensions: &[String]) -> Option<PathBuf> {
    if let Some(main) = package_main(dir) {
        let main_path = path::resolve(dir, Path::new(&main));
        if let Some(found) = resolve_as_file(&main_path, extensions) {
            return Some(found);
        }
        if let Some(found) = resolve_index(&main_path, extensions) {
            return Some(found);
        }
    }
    resolve_index(dir, extensions)
}

fn resolve_index(dir: &Path, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| dir.join(format!("index{}", ext)))
        .find(|p| p.is_file())
}

fn package_main(dir: &Path) -> Option<String> {
    let manifest = dir.join("package.json");
    if !manifest.is_file() {
        return None;
    }
    let content = io::read_file(&manifest, "read package manifest").ok()?;
    match serde_json::from_str::<PackageManifest>(&content) {
        Ok(pkg) => pkg.main.filter(|main| !main.is_empty()),
        Err(err) => {
            debug!(
                path = %manifest.display(),
                error = %err,
                "ignoring unreadable package manifest"
            );
            None
        }
    }
}

// `foo.config` + `.js` is `foo.config.js`, not `foo.js`.
fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_os_string();
    raw.push(ext);
    PathBuf::from(raw)
}
