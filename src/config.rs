//! Analyzer configuration parsing and validation
use std::path::PathBuf;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format as _, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};

/// The parsed and validated config for the analyzer
///
/// Values are read from defaults, then `.lexiscan.toml`, then
/// `LEXISCAN_*`-prefixed environment variables, later sources winning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Config {
    /// Path to the dictionary XML source
    pub jmdict_xml: PathBuf,

    /// Path to the supplemental (NEologd) dictionary repository checkout,
    /// used for version reporting
    pub neologd_dir: PathBuf,

    /// Application data directory, holds the dictionary cache file
    pub data_dir: PathBuf,
}

impl Config {
    /// Build a config from explicit paths
    #[must_use]
    pub fn new(
        jmdict_xml: impl Into<PathBuf>,
        neologd_dir: impl Into<PathBuf>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            jmdict_xml: jmdict_xml.into(),
            neologd_dir: neologd_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    pub fn from(provider: impl Provider) -> Result<Config, figment::Error> {
        Figment::from(provider).extract()
    }

    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Config::default())
            .admerge(Toml::file(".lexiscan.toml"))
            .admerge(Env::prefixed("LEXISCAN_"))
    }

    /// Read the configuration from the config file and environment
    pub fn read() -> Result<Config, figment::Error> {
        Config::figment().extract()
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Lexiscan Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
