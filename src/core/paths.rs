use crate::error::Result;
use std::env;
use std::path::PathBuf;

/// npm prefix from the environment, if one is configured.
fn npm_prefix() -> Option<PathBuf> {
    ["npm_config_prefix", "NPM_CONFIG_PREFIX"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Global module install directory for the current platform.
pub fn global_modules() -> Result<PathBuf> {
    if let Some(prefix) = npm_prefix() {
        return Ok(modules_under_prefix(prefix));
    }

    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            crate::error::Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("npm").join("node_modules"))
    }

    #[cfg(not(windows))]
    {
        Ok(modules_under_prefix(PathBuf::from("/usr/local")))
    }
}

#[cfg(windows)]
fn modules_under_prefix(prefix: PathBuf) -> PathBuf {
    prefix.join("node_modules")
}

#[cfg(not(windows))]
fn modules_under_prefix(prefix: PathBuf) -> PathBuf {
    prefix.join("lib").join("node_modules")
}
