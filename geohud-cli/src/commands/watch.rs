//! Watch command - live HUD fed from standard input.
//!
//! Every input line is either a control or observed text (a payload body
//! or an iframe URL). Observed text is handed to the session on its own
//! task so a newer coordinate can supersede a lookup still in flight.
//! Resolved places arrive on the session's broadcast channel and are
//! printed as they come.
//!
//! # Controls
//!
//! | Line                | Effect                                |
//! |---------------------|---------------------------------------|
//! | `:q`, `:refresh`    | Re-resolve the current coordinate     |
//! | `:unlock`           | Accept the next coordinate            |
//! | `:+` / `:-`         | Zoom the minimap in or out            |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use geohud::minimap::MapRenderer;
use geohud::provider::{CountryMetadata, ForwardGeocoder, ReverseGeocoder};
use geohud::session::{CandidateOutcome, ResolveOutcome, Session};
use geohud::tracker::TrackerPolicy;

use super::common::PolicyArg;
use crate::error::CliError;
use crate::hud;
use crate::runner::{write_output, CliRunner, HudSession};

/// Arguments for the watch command.
pub struct WatchArgs {
    pub policy: Option<PolicyArg>,
    pub minimap: Option<PathBuf>,
}

/// A control line typed into the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Refresh,
    Unlock,
    ZoomIn,
    ZoomOut,
}

impl Control {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            ":q" | ":refresh" => Some(Control::Refresh),
            ":unlock" => Some(Control::Unlock),
            ":+" => Some(Control::ZoomIn),
            ":-" => Some(Control::ZoomOut),
            _ => None,
        }
    }
}

/// Run the watch command.
pub fn run(runner: &CliRunner, args: WatchArgs) -> Result<(), CliError> {
    runner.log_startup("watch");
    let session = Arc::new(runner.create_session(args.policy.map(Into::into))?);

    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    ctrlc::set_handler(move || signal_token.cancel())
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let policy = args
        .policy
        .map(TrackerPolicy::from)
        .unwrap_or(runner.config().tracker.policy);
    eprintln!(
        "Watching stdin (policy: {}). Controls: :q refresh, :unlock, :+ / :- zoom. Ctrl-C to stop.",
        policy
    );

    runner.block_on(watch_loop(session, args.minimap, cancellation));
    info!("Watch stopped");
    Ok(())
}

async fn watch_loop(
    session: Arc<HudSession>,
    minimap: Option<PathBuf>,
    cancellation: CancellationToken,
) {
    let printer = tokio::spawn(print_places(
        session.clone(),
        minimap.clone(),
        cancellation.clone(),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = cancellation.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match Control::parse(&line) {
                    Some(control) => {
                        apply_control(&session, control, minimap.as_deref());
                    }
                    None => spawn_candidate(&session, line),
                },
                Ok(None) => {
                    debug!("End of input");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            },
        }
    }

    cancellation.cancel();
    if let Err(e) = printer.await {
        warn!(error = %e, "Printer task failed");
    }
}

fn spawn_candidate(session: &Arc<HudSession>, line: String) {
    let session = session.clone();
    tokio::spawn(async move {
        match session.on_candidate(&line).await {
            CandidateOutcome::NoCoordinate => debug!("No coordinate in line"),
            CandidateOutcome::Rejected(reason) => debug!(reason = ?reason, "Candidate ignored"),
            CandidateOutcome::Resolved(outcome) => log_outcome(&outcome),
        }
    });
}

/// Applies a control line without waiting on the network.
///
/// Refreshes and minimap saves run on their own task so stdin and Ctrl-C
/// keep being serviced while a lookup is in flight.
fn apply_control<G, F, M>(
    session: &Arc<Session<G, F, M>>,
    control: Control,
    minimap: Option<&Path>,
) -> Option<JoinHandle<()>>
where
    G: ReverseGeocoder + ForwardGeocoder + 'static,
    F: CountryMetadata + 'static,
    M: MapRenderer + 'static,
{
    match control {
        Control::Refresh => {
            let session = session.clone();
            Some(tokio::spawn(async move {
                match session.refresh().await {
                    Some(outcome) => log_outcome(&outcome),
                    None => eprintln!("Nothing to refresh yet"),
                }
            }))
        }
        Control::Unlock => {
            if session.unlock() {
                eprintln!("Unlocked, waiting for the next coordinate");
            }
            None
        }
        Control::ZoomIn | Control::ZoomOut => {
            let zoom = if control == Control::ZoomIn {
                session.zoom_in()
            } else {
                session.zoom_out()
            };
            eprintln!("Zoom: {}", zoom);
            let path = minimap?.to_path_buf();
            let session = session.clone();
            Some(tokio::spawn(async move {
                save_minimap(&session, &path).await;
            }))
        }
    }
}

fn log_outcome(outcome: &ResolveOutcome) {
    match outcome {
        ResolveOutcome::Displayed(place) => {
            debug!(generation = %place.generation, "Place displayed")
        }
        ResolveOutcome::Stale(generation) => {
            debug!(generation = %generation, "Resolution superseded")
        }
        ResolveOutcome::Failed(e) => {
            warn!(error = %e, "Resolution failed, keeping previous display");
            eprintln!("Lookup failed: {}", e);
        }
    }
}

async fn print_places(
    session: Arc<HudSession>,
    minimap: Option<PathBuf>,
    cancellation: CancellationToken,
) {
    let mut places = session.subscribe();
    loop {
        tokio::select! {
            _ = cancellation.cancelled() => break,
            received = places.recv() => match received {
                Ok(place) => {
                    println!("{}\n", hud::render(&place));
                    if let Some(path) = &minimap {
                        save_minimap(&session, path).await;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped = skipped, "Printer lagged behind resolutions");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
}

async fn save_minimap<G, F, M>(session: &Session<G, F, M>, path: &Path)
where
    G: ReverseGeocoder + ForwardGeocoder,
    F: CountryMetadata,
    M: MapRenderer,
{
    match session.render_minimap().await {
        Ok(Some(image)) => {
            if let Err(e) = write_output(path, &image) {
                warn!(error = %e, "Failed to save minimap");
            }
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Minimap rendering failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use geohud::continent::{Continent, ContinentResolver};
    use geohud::coord::Coordinate;
    use geohud::place::PlaceResolver;
    use geohud::provider::{ProviderError, RawAddress};
    use geohud::session::SessionConfig;

    /// Geocoder whose first reverse lookup fails and every later one hangs.
    #[derive(Default)]
    struct HangingGeocoder {
        reverse_calls: AtomicUsize,
    }

    impl ReverseGeocoder for HangingGeocoder {
        async fn reverse(&self, _coord: Coordinate) -> Result<RawAddress, ProviderError> {
            if self.reverse_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(ProviderError::HttpError("HTTP 503".into()));
            }
            std::future::pending().await
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    impl ForwardGeocoder for HangingGeocoder {
        async fn search(&self, _query: &str) -> Result<Option<Coordinate>, ProviderError> {
            Ok(None)
        }
    }

    struct AnyEurope;

    impl CountryMetadata for AnyEurope {
        async fn continent_of(&self, _code: &str) -> Result<Continent, ProviderError> {
            Ok(Continent::Europe)
        }
    }

    struct NoMap;

    impl MapRenderer for NoMap {
        async fn render(&self, _coord: Coordinate, _zoom: u8) -> Result<Vec<u8>, ProviderError> {
            Err(ProviderError::Render("no map".into()))
        }
    }

    fn hanging_session() -> Arc<Session<HangingGeocoder, AnyEurope, NoMap>> {
        Arc::new(Session::new(
            PlaceResolver::new(HangingGeocoder::default()).with_timeout(Duration::from_secs(3600)),
            ContinentResolver::new(AnyEurope),
            NoMap,
            SessionConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_refresh_control_does_not_block_the_loop() {
        let session = hanging_session();
        session.on_candidate("48.8566,2.3522").await;

        let handle = apply_control(&session, Control::Refresh, None)
            .expect("refresh runs on its own task");
        let reverse_calls = &session.places().geocoder().reverse_calls;
        for _ in 0..100 {
            if reverse_calls.load(Ordering::SeqCst) == 2 {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(reverse_calls.load(Ordering::SeqCst), 2);
        assert!(!handle.is_finished(), "refresh is still waiting on the geocoder");
        handle.abort();
    }

    #[tokio::test]
    async fn test_local_controls_spawn_nothing() {
        let session = hanging_session();
        assert!(apply_control(&session, Control::Unlock, None).is_none());
        assert!(apply_control(&session, Control::ZoomIn, None).is_none());
        assert_eq!(session.map_view().zoom(), 14);
    }

    #[test]
    fn test_control_lines() {
        assert_eq!(Control::parse(":q"), Some(Control::Refresh));
        assert_eq!(Control::parse(" :refresh "), Some(Control::Refresh));
        assert_eq!(Control::parse(":unlock"), Some(Control::Unlock));
        assert_eq!(Control::parse(":+"), Some(Control::ZoomIn));
        assert_eq!(Control::parse(":-"), Some(Control::ZoomOut));
    }

    #[test]
    fn test_payloads_are_not_controls() {
        assert_eq!(Control::parse("48.8566,2.3522"), None);
        assert_eq!(Control::parse("https://example.com/embed?location=1,2"), None);
        assert_eq!(Control::parse(":quit"), None);
    }
}
