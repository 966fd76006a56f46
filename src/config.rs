use crate::extract::ExtractBackend;
use anyhow::{Context, Result};
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "geth-installer.toml";

/// Optional `geth-installer.toml`. Every key may be omitted.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    /// Base URL serving `/builds/...`
    #[serde(default)]
    pub mirror: Option<String>,
    #[serde(default)]
    pub install_path: Option<PathBuf>,
    #[serde(default)]
    pub extractor: Option<ExtractBackend>,
    #[serde(default)]
    pub progress: Option<bool>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Pin a release other than the built-in one; must carry its own checksums.
    #[serde(default)]
    pub release: Option<ReleaseConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    pub version: String,
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

impl InstallerConfig {
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let data = fs::read_to_string(&path)?;
        let cfg = Self::parse(&data).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }
}
