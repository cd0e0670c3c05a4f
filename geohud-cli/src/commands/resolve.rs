//! Resolve command - one-shot place lookup for a coordinate.

use std::path::PathBuf;

use geohud::session::{CandidateOutcome, ResolveOutcome};
use geohud::tracker::TrackerPolicy;

use super::common::parse_coordinate;
use crate::error::CliError;
use crate::hud;
use crate::runner::{write_output, CliRunner};

/// Arguments for the resolve command.
pub struct ResolveArgs {
    pub lat: f64,
    pub lon: f64,
    pub minimap: Option<PathBuf>,
}

/// Run the resolve command.
pub fn run(runner: &CliRunner, args: ResolveArgs) -> Result<(), CliError> {
    runner.log_startup("resolve");
    let coord = parse_coordinate(args.lat, args.lon)?;
    let session = runner.create_session(Some(TrackerPolicy::AlwaysRefresh))?;

    runner.block_on(async {
        let place = match session.on_coordinate(coord).await {
            CandidateOutcome::Resolved(ResolveOutcome::Displayed(place)) => place,
            CandidateOutcome::Resolved(ResolveOutcome::Failed(e)) => {
                return Err(CliError::Resolve(e))
            }
            other => {
                return Err(CliError::Config(format!(
                    "Unexpected resolution outcome: {:?}",
                    other
                )))
            }
        };

        println!("{}", hud::render(&place));

        if let Some(path) = &args.minimap {
            if let Some(image) = session.render_minimap().await? {
                write_output(path, &image)?;
                println!("Minimap: {}", path.display());
            }
        }
        Ok(())
    })
}
