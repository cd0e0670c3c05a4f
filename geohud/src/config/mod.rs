//! User configuration loaded from `~/.geohud/config.ini`.
//!
//! - `settings` - one struct per `[section]`
//! - `defaults` - `DEFAULT_*` constants and `ConfigFile::default()`
//! - `parser` - INI → `ConfigFile`, validating values
//! - `writer` - `ConfigFile` → commented INI
//! - `file` - load, save and path helpers
//!
//! # Example
//!
//! ```no_run
//! use geohud::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! println!("geocoder: {}", config.geocoder.provider.as_str());
//! # Ok::<(), geohud::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{default_log_file, DEFAULT_LANGUAGE, DEFAULT_LOG_FILE_NAME};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CacheSettings, ConfigFile, GeocoderKind, GeocoderSettings, LoggingSettings, MapSettings,
    MetadataSettings, NetworkSettings, TrackerSettings,
};
