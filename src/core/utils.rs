use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".fruit_ledger";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "Reporte de compra de fruta.xlsx";

/// Environment variable overriding the application directory.
pub const HOME_ENV: &str = "FRUIT_LEDGER_HOME";

/// Resolves application paths relative to a base directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.fruit_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn default_data_file_in(base: &Path) -> PathBuf {
        base.join(DEFAULT_DATA_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
