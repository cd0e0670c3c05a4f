//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, the async runtime
//! and provider wiring to reduce duplication across command handlers.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use geohud::config::ConfigFile;
use geohud::continent::ContinentResolver;
use geohud::logging::{init_logging, split_log_path, LoggingGuard};
use geohud::minimap::{MapBackend, MinimapRenderer};
use geohud::place::PlaceResolver;
use geohud::provider::{
    AsyncReqwestClient, GeocoderFactory, GeocoderProvider, RestCountriesClient,
};
use geohud::session::{Session, SessionConfig};
use geohud::tracker::TrackerPolicy;

use crate::error::CliError;

/// Grace period for runtime tasks at exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

/// Session type the CLI drives: live HTTP providers.
pub type HudSession = Session<
    GeocoderProvider,
    RestCountriesClient<AsyncReqwestClient>,
    MinimapRenderer<AsyncReqwestClient>,
>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    runtime: tokio::runtime::Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `verbose` - Mirror log events to stderr
    pub fn new(debug_mode: bool, verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, verbose, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("geohud-worker")
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            logging_guard,
            config,
            runtime,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("GeoHUD v{}", geohud::VERSION);
        info!("GeoHUD CLI: {} command", command);
    }

    /// Runs `future` to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Stops the runtime without waiting on a pending stdin read.
    pub fn shutdown(self) {
        self.runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    }

    fn http_client(&self) -> Result<AsyncReqwestClient, CliError> {
        Ok(AsyncReqwestClient::with_options(
            self.config.network.timeout,
            &self.config.network.user_agent,
        )?)
    }

    /// Creates the minimap renderer, optionally overriding the configured backend.
    pub fn create_renderer(
        &self,
        backend: Option<MapBackend>,
    ) -> Result<MinimapRenderer<AsyncReqwestClient>, CliError> {
        let map = &self.config.map;
        Ok(
            MinimapRenderer::new(self.http_client()?, backend.unwrap_or(map.backend))
                .with_size(map.width, map.height)
                .with_timeout(self.config.request_timeout()),
        )
    }

    /// Wires providers, resolvers and the tracker into a session.
    pub fn create_session(&self, policy: Option<TrackerPolicy>) -> Result<HudSession, CliError> {
        let config = &self.config;
        let geocoder_config = config.geocoder_config();
        info!(
            provider = geocoder_config.name(),
            endpoint = geocoder_config.base_url(),
            "Creating geocoder"
        );

        let http_client = self.http_client()?;
        let geocoder = GeocoderFactory::new(http_client.clone())
            .with_language(config.geocoder.language.clone())
            .create(&geocoder_config)?;

        let places = PlaceResolver::new(geocoder)
            .with_precision(config.cache.grid_precision)
            .with_timeout(config.request_timeout());
        let continents = ContinentResolver::new(RestCountriesClient::with_base_url(
            http_client,
            config.metadata.url.clone(),
        ))
        .with_timeout(config.request_timeout());

        let session_config = SessionConfig {
            policy: policy.unwrap_or(config.tracker.policy),
            tracker_epsilon: config.tracker.epsilon,
            zoom: config.map.zoom,
            ..SessionConfig::default()
        };

        Ok(Session::new(
            places,
            continents,
            self.create_renderer(None)?,
            session_config,
        ))
    }
}

/// Writes `data` to `path`, creating parent directories.
pub fn write_output(path: &Path, data: &[u8]) -> Result<(), CliError> {
    let to_error = |error| CliError::FileWrite {
        path: path.display().to_string(),
        error,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, data).map_err(to_error)?;
    info!(path = %path.display(), bytes = data.len(), "Wrote output file");
    Ok(())
}
