//! Network configuration lookup.
//!
//! Configuration is ini-style: one section per network plus a `[DEFAULT]`
//! section for global values, e.g.
//!
//! ```ini
//! [DEFAULT]
//! GANACHE_URL = http://127.0.0.1:8545
//! WEB3_INFURA_PROJECT_ID = 8239...
//!
//! [ganache]
//! FACTORY_ADDRESS = 0x2fC1...
//! GAS_PRICE = 9000000000
//! ```
//!
//! Lookups fall back to `[DEFAULT]` when a key is absent from the requested
//! section, matching the file format's conventions. Providers are injected
//! explicitly wherever configuration is needed, so embedders and tests can
//! substitute their own source.

use crate::error::{Error, Result};
use ini::Ini;
use std::collections::HashMap;
use std::path::Path;

/// Name of the section holding global values.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A source of per-network configuration values.
pub trait ConfigProvider: Send + Sync {
    /// Look up a value; absent section or key is a [`Error::Configuration`].
    fn value(&self, section: &str, key: &str) -> Result<String>;
}

/// Configuration backed by an ini file on disk.
#[derive(Debug)]
pub struct FileConfig {
    ini: Ini,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        //! Read and parse the configuration file.
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(Self { ini })
    }
}

impl ConfigProvider for FileConfig {
    fn value(&self, section: &str, key: &str) -> Result<String> {
        self.ini
            .get_from(Some(section), key)
            .or_else(|| self.ini.get_from(Some(DEFAULT_SECTION), key))
            .or_else(|| self.ini.get_from(None::<String>, key))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Configuration(format!("key {key} not found in section [{section}]"))
            })
    }
}

/// In-memory configuration, primarily a test double.
#[derive(Clone, Debug, Default)]
pub struct MemoryConfig {
    values: HashMap<(String, String), String>,
}

impl MemoryConfig {
    #[must_use]
    pub fn new() -> Self {
        //! Create an empty configuration.
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, section: &str, key: &str, value: &str) -> Self {
        //! Add one value under the given section.
        self.values
            .insert((section.to_string(), key.to_string()), value.to_string());
        self
    }
}

impl ConfigProvider for MemoryConfig {
    fn value(&self, section: &str, key: &str) -> Result<String> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .or_else(|| {
                self.values
                    .get(&(DEFAULT_SECTION.to_string(), key.to_string()))
            })
            .cloned()
            .ok_or_else(|| {
                Error::Configuration(format!("key {key} not found in section [{section}]"))
            })
    }
}
