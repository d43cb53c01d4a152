use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, MemoryResult};

/// Default first offset handed out by a fresh store.
pub const DEFAULT_INITIAL_OFFSET: u32 = 8;

/// Backing store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Block assigned to every address the store returns.
    pub block_id: u32,
    /// First value of the allocation counter.
    pub initial_offset: u32,
    /// Upper bound on the total bytes allocated (None = unbounded)
    pub max_bytes: Option<u64>,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            block_id: 0,
            initial_offset: DEFAULT_INITIAL_OFFSET,
            max_bytes: None,
        }
    }
}

impl AllocatorConfig {
    /// Check that a store built from this config can never hand out the null address.
    pub fn validate(&self) -> MemoryResult<()> {
        if self.block_id == 0 && self.initial_offset == 0 {
            return Err(MemoryError::Config(
                "initial_offset 0 in block 0 would yield the null address".into(),
            ));
        }
        Ok(())
    }

    /// Parse a TOML document, then apply environment overrides.
    pub fn from_toml_str(s: &str) -> MemoryResult<Self> {
        let mut cfg: AllocatorConfig = toml::from_str(s)?;
        apply_overrides(&mut cfg, |key| env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from a TOML file, with environment variable overrides.
    /// Falls back to defaults if the file is not found.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> MemoryResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No allocator config at {}, using defaults",
                    path.as_ref().display()
                );
                let mut cfg = Self::default();
                apply_overrides(&mut cfg, |key| env::var(key).ok())?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Apply SIMPLEDB_* overrides read through `lookup`.
fn apply_overrides<F>(cfg: &mut AllocatorConfig, lookup: F) -> MemoryResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("SIMPLEDB_BLOCK_ID") {
        cfg.block_id = parse_override("SIMPLEDB_BLOCK_ID", &v)?;
    }

    if let Some(v) = lookup("SIMPLEDB_INITIAL_OFFSET") {
        cfg.initial_offset = parse_override("SIMPLEDB_INITIAL_OFFSET", &v)?;
    }

    if let Some(v) = lookup("SIMPLEDB_MAX_BYTES") {
        cfg.max_bytes = match v.trim() {
            "" | "none" | "unbounded" => None,
            s => Some(parse_override("SIMPLEDB_MAX_BYTES", s)?),
        };
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> MemoryResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MemoryError::Config(format!("invalid value for {key}: {value:?}")))
}
