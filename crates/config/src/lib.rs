//! Configuration loading for the oven services.
//!
//! Settings are layered: built-in defaults, then an `oven.toml` file, then
//! `OVEN_*` environment variables, each overriding the last. Only the knobs
//! the archive subsystem actually reads live here; everything else about the
//! deployment belongs to the HTTP layer's own configuration.

pub mod error;

use crate::error::{ErrorKind, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default maximum decoded size rendered to a reader: 1 MiB.
pub const DEFAULT_MAX_RENDER_BYTES: usize = 1 << 20;

/// Environment variable prefix for overrides (`OVEN_CACHE_DIR`, ...).
const ENV_PREFIX: &str = "OVEN_";
/// Configuration filename looked up in the working directory.
const CONFIG_FILE: &str = "oven.toml";

/// Runtime settings for the archive subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory distribution files are cached in after first download.
    pub cache_dir: PathBuf,
    /// Decoded member files larger than this are refused for display.
    pub max_render_bytes: usize,
    /// Rewrite `\` to `/` in archive member paths. Off by default to match
    /// the behavior readers already rely on.
    pub normalize_backslashes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            max_render_bytes: DEFAULT_MAX_RENDER_BYTES,
            normalize_backslashes: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, `oven.toml`, and the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let config = oven_config::Config::load()?;
    /// println!("caching under {}", config.cache_dir.display());
    /// # Ok::<(), oven_config::error::Error>(())
    /// ```
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .map_err(|err| exn::Exn::from(ErrorKind::Invalid(err.to_string())))?;
        if config.max_render_bytes == 0 {
            exn::bail!(ErrorKind::Invalid("max_render_bytes must be positive".to_string()));
        }
        tracing::debug!(
            cache_dir = %config.cache_dir.display(),
            max_render_bytes = config.max_render_bytes,
            "configuration loaded"
        );
        Ok(config)
    }
}

/// `~/.oven/cache`, falling back to a relative directory when the platform
/// reports no home (containers with scrubbed environments).
fn default_cache_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".oven/cache"))
        .unwrap_or_else(|| PathBuf::from(".oven/cache"))
}
