//! # Application Configuration
//!
//! Where the files live, where the server listens, which camera to open.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KLINIK_DATA_FILE=/srv/klinik/data_obat.csv                         │
//! │     KLINIK_PORT=8080                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $KLINIK_CONFIG, or                                                 │
//! │     ~/.config/klinik-sehat/klinik.toml (Linux)                         │
//! │     ~/Library/Application Support/id.klinik-sehat.klinik/klinik.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     data_obat.csv, scan_log.csv, qr/ in the working directory          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # klinik.toml
//! [storage]
//! data_file = "data_obat.csv"
//! log_file = "scan_log.csv"
//! qr_dir = "qr"
//!
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8501
//!
//! [camera]
//! index = 0
//! refresh_ms = 500
//!
//! [display]
//! clinic_name = "Klinik Sehat"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use klinik_qr::{QrCodec, DEFAULT_QR_DIR};
use klinik_store::{StoreConfig, DEFAULT_DATA_FILE, DEFAULT_LOG_FILE};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KLINIK_CONFIG";

// =============================================================================
// Storage Settings
// =============================================================================

/// File locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Inventory table.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Scan log.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Generated QR images.
    #[serde(default = "default_qr_dir")]
    pub qr_dir: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_qr_dir() -> PathBuf {
    PathBuf::from(DEFAULT_QR_DIR)
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_file: default_data_file(),
            log_file: default_log_file(),
            qr_dir: default_qr_dir(),
        }
    }
}

// =============================================================================
// Server Settings
// =============================================================================

/// HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address. Default: 127.0.0.1 (this machine only)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port. Default: 8501
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Camera Settings
// =============================================================================

/// Capture device used by the camera scan page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Device index (0 is the system default).
    #[serde(default)]
    pub index: u32,

    /// How often the scan page reloads while scanning (milliseconds).
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
}

fn default_refresh_ms() -> u64 {
    500
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            index: 0,
            refresh_ms: default_refresh_ms(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Shown in the page title and sidebar header.
    #[serde(default = "default_clinic_name")]
    pub clinic_name: String,
}

fn default_clinic_name() -> String {
    crate::DEFAULT_CLINIC_NAME.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            clinic_name: default_clinic_name(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$KLINIK_CONFIG`, else platform dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.data_file must not be empty".into()));
        }
        if self.storage.log_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.log_file must not be empty".into()));
        }
        if self.storage.qr_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.qr_dir must not be empty".into()));
        }
        if self.storage.data_file == self.storage.log_file {
            return Err(ConfigError::Invalid(
                "storage.data_file and storage.log_file must differ".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be greater than 0".into()));
        }
        if self.camera.refresh_ms == 0 {
            return Err(ConfigError::Invalid("camera.refresh_ms must be greater than 0".into()));
        }
        Ok(())
    }

    /// Applies `KLINIK_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("KLINIK_DATA_FILE") {
            debug!(path = %path, "Overriding data file from environment");
            self.storage.data_file = PathBuf::from(path);
        }

        if let Some(path) = lookup("KLINIK_LOG_FILE") {
            self.storage.log_file = PathBuf::from(path);
        }

        if let Some(path) = lookup("KLINIK_QR_DIR") {
            self.storage.qr_dir = PathBuf::from(path);
        }

        if let Some(addr) = lookup("KLINIK_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("KLINIK_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!(port = %port, "Ignoring invalid KLINIK_PORT"),
            }
        }

        if let Some(index) = lookup("KLINIK_CAMERA_INDEX") {
            match index.parse::<u32>() {
                Ok(i) => self.camera.index = i,
                Err(_) => warn!(index = %index, "Ignoring invalid KLINIK_CAMERA_INDEX"),
            }
        }

        if let Some(name) = lookup("KLINIK_CLINIC_NAME") {
            self.display.clinic_name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "klinik-sehat", "klinik")
            .map(|dirs| dirs.config_dir().join("klinik.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// File locations for klinik-store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .data_file(self.storage.data_file.clone())
            .log_file(self.storage.log_file.clone())
    }

    /// QR codec writing into the configured directory.
    pub fn qr_codec(&self) -> QrCodec {
        QrCodec::new(self.storage.qr_dir.clone())
    }

    /// Settings with every file inside `dir` (tests, portable installs).
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut config = AppConfig::default();
        config.storage.data_file = dir.join(DEFAULT_DATA_FILE);
        config.storage.log_file = dir.join(DEFAULT_LOG_FILE);
        config.storage.qr_dir = dir.join(DEFAULT_QR_DIR);
        config
    }
}
