use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use v1::beneficiary::BeneficiaryConfig;
pub use v1::defaults::PayloadDefaults;

mod v1 {
    /// Beneficiary Config
    pub mod beneficiary;

    /// Payload Defaults
    pub mod defaults;

    pub fn default_currency() -> String {
        "EUR".to_string()
    }
}

pub const CURRENT_VERSION: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("ParseError: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("SerializeError: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    version: usize,
    #[serde(default)]
    beneficiary: v1::beneficiary::BeneficiaryConfig,
    #[serde(default)]
    defaults: v1::defaults::PayloadDefaults,
}

impl Config {
    pub fn new(beneficiary: BeneficiaryConfig, defaults: PayloadDefaults) -> Self {
        Self {
            version: CURRENT_VERSION,
            beneficiary,
            defaults,
        }
    }

    pub fn beneficiary(&self) -> &v1::beneficiary::BeneficiaryConfig {
        &self.beneficiary
    }

    pub fn beneficiary_mut(&mut self) -> &mut v1::beneficiary::BeneficiaryConfig {
        &mut self.beneficiary
    }

    pub fn defaults(&self) -> &v1::defaults::PayloadDefaults {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut v1::defaults::PayloadDefaults {
        &mut self.defaults
    }

    pub fn needs_upgrade(&self) -> bool {
        self.version < CURRENT_VERSION
    }

    pub fn upgrade_to_latest(mut self) -> Self {
        if self.needs_upgrade() {
            tracing::warn!(
                from = self.version,
                to = CURRENT_VERSION,
                "upgrading config file format"
            );
            self.version = CURRENT_VERSION;
        }
        self
    }

    pub fn from_toml(toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Reads the config from the user's config directory, or returns the
    /// default config if there is none yet.
    pub fn load_from_file() -> Result<Self, ConfigError> {
        Self::load_from_path(&config_location()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Default::default());
        }
        let config = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&config)?.upgrade_to_latest())
    }

    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        self.save_to_path(&config_location()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = self.to_toml()?;
        let config_file = std::fs::File::create(path)?;
        let mut buf = BufWriter::new(config_file);
        buf.write_all(toml.as_bytes())?;
        buf.flush()?;
        Ok(())
    }

    /// get a list of all things potentially wrong with the config
    pub fn config_errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        if self.beneficiary().name.is_empty() {
            errors.push("Beneficiary name is empty");
        }
        if self.beneficiary().iban.is_empty() {
            errors.push("Beneficiary IBAN is empty");
        }
        if self.beneficiary().bic.is_empty() && self.defaults().version.requires_bic() {
            errors.push("Beneficiary BIC is empty, but version 1 requires it");
        }
        if self.defaults().currency.len() != 3 {
            errors.push("Currency is not a 3 letter code");
        }
        errors
    }
}

fn config_location() -> Result<PathBuf, ConfigError> {
    if let Some(config_dir) = dirs::config_dir() {
        let dir = config_dir.join("sepa-qr");
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join("config.toml"))
    } else {
        Ok(PathBuf::from("sepa-qr.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            v1::beneficiary::BeneficiaryConfig::default(),
            v1::defaults::PayloadDefaults::default(),
        )
    }
}
