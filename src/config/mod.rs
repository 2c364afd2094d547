use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::budget::BudgetType;
use crate::core::utils::{app_data_dir, config_file_in, ensure_dir};
use crate::currency::{FormatOptions, NumberFormat};
use crate::errors::LedgerError;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub budget_type: BudgetType,
    #[serde(default)]
    pub number_format: NumberFormat,
    #[serde(default)]
    pub hide_fraction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            budget_type: BudgetType::default(),
            number_format: NumberFormat::default(),
            hide_fraction: false,
        }
    }
}

impl Config {
    fn default_locale() -> String {
        "en-US".into()
    }

    fn default_currency() -> String {
        "USD".into()
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            number_format: self.number_format,
            hide_fraction: self.hide_fraction,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Loads the stored config, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)
                .map_err(|err| LedgerError::Config(format!("{}: {err}", self.path.display())))?;
            debug!(path = %self.path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/x/config.json"));
        assert_eq!(tmp, PathBuf::from("/x/config.json.tmp"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"budget_type":"tracking"}"#).unwrap();
        assert_eq!(config.budget_type, BudgetType::Tracking);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.number_format, NumberFormat::CommaDot);
    }
}
