//! Alias, fullname and generator object-path formatting.
//!
//! A generator published as `generate-foo` is addressed by its alias `foo`
//! once registered, and nested generators live under dotted object paths
//! such as `generators.a.generators.b`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::config::ResolveOptions;
use crate::error::{Error, Result};

const GENERATORS: &str = "generators.";

static SEGMENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.generators\.|\.").unwrap());

/// Create an alias from `name`.
///
/// Uses `options.alias` when set. Otherwise strips the effective prefix
/// (plus an optional dash) from the front of `name`, or, with no prefix
/// configured, takes the file stem and drops everything up to the first dash.
///
/// ```
/// use generate_util::naming::to_alias;
/// use generate_util::config::ResolveOptions;
///
/// assert_eq!(to_alias("generate-foo", &ResolveOptions::new()), "foo");
/// assert_eq!(to_alias("a-b-c", &ResolveOptions::new().prefix("a-b")), "c");
/// ```
pub fn to_alias(name: &str, options: &ResolveOptions) -> String {
    if let Some(alias) = &options.alias {
        return alias(name);
    }

    if let Some(prefix) = options.effective_prefix() {
        return match name.strip_prefix(prefix) {
            Some(rest) => rest.strip_prefix('-').unwrap_or(rest).to_string(),
            None => name.to_string(),
        };
    }

    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());

    match stem.find('-') {
        Some(idx) => stem[idx + 1..].to_string(),
        None => stem,
    }
}

/// Create a fullname from `alias` by prepending the effective prefix.
///
/// Fails when neither `prefix` nor `modulename` is configured.
pub fn to_fullname(alias: &str, options: &ResolveOptions) -> Result<String> {
    let prefix = options.effective_prefix().ok_or_else(|| {
        Error::config_invalid_value("prefix", None, "A prefix is required to build a fullname")
            .with_hint("Set options.prefix or options.modulename")
    })?;
    Ok(join_prefix(alias, prefix))
}

/// Prefix `alias` unless it is an absolute path or already contains `prefix`.
///
/// The containment check is a substring match, not a leading-prefix match:
/// `xfoo-bar` counts as already prefixed by `foo`.
pub(crate) fn join_prefix(alias: &str, prefix: &str) -> String {
    if Path::new(alias).is_absolute() || alias.contains(prefix) {
        alias.to_string()
    } else {
        format!("{}-{}", prefix, alias)
    }
}

/// Create the object path used to look up a nested generator.
///
/// Returns `None` for anything that looks like a filesystem path.
///
/// ```
/// use generate_util::naming::to_generator_path;
///
/// assert_eq!(
///     to_generator_path("a.b.c", true).as_deref(),
///     Some("generators.a.generators.b.generators.c")
/// );
/// ```
pub fn to_generator_path(name: &str, include_prefix: bool) -> Option<String> {
    if name.contains(['/', '\\']) {
        return None;
    }

    let name = name.strip_prefix(GENERATORS).unwrap_or(name);
    let joined = SEGMENT_SEPARATOR
        .split(name)
        .collect::<Vec<_>>()
        .join(".generators.");

    if include_prefix {
        Some(format!("{}{}", GENERATORS, joined))
    } else {
        Some(joined)
    }
}
