use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet holding the `Data` and `Pagos` sheets. Defaults to a file in
    /// the application directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: Self::default_currency_symbol(),
        }
    }
}

impl Config {
    fn default_currency_symbol() -> String {
        "$".into()
    }
}

/// Locates `config.json` in the application directory. Nothing is created on
/// disk until [`ConfigManager::save`] runs.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: PathResolver::config_file_in(&base),
            base,
        }
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
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
        Ok(())
    }

    /// Resolves the data file, relative paths being taken from the application directory.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        match &config.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => PathResolver::default_data_file_in(&self.base),
        }
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
    use tempfile::tempdir;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            manager.data_file(&config),
            dir.path().join("Reporte de compra de fruta.xlsx")
        );
    }

    #[test]
    fn saved_config_is_read_back() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        let config = Config {
            data_file: Some(PathBuf::from("compras.xlsx")),
            currency_symbol: "S/".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(manager.data_file(&config), dir.path().join("compras.xlsx"));
    }

    #[test]
    fn currency_symbol_defaults_when_absent_from_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        fs::write(manager.path(), "{}").unwrap();
        assert_eq!(manager.load().unwrap().currency_symbol, "$");
    }

    #[test]
    fn nothing_is_created_until_save() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app");
        let manager = ConfigManager::with_base_dir(base.clone());

        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(!base.exists());

        manager.save(&Config::default()).unwrap();
        assert!(manager.path().exists());
    }
}
