//! Minimap command - write a static map image for a coordinate.

use std::path::PathBuf;

use geohud::minimap::{clamp_zoom, MapRenderer};

use super::common::{parse_coordinate, BackendArg};
use crate::error::CliError;
use crate::runner::{write_output, CliRunner};

/// Arguments for the minimap command.
pub struct MinimapArgs {
    pub lat: f64,
    pub lon: f64,
    pub zoom: Option<i32>,
    pub backend: Option<BackendArg>,
    pub output: PathBuf,
}

/// Run the minimap command.
pub fn run(runner: &CliRunner, args: MinimapArgs) -> Result<(), CliError> {
    runner.log_startup("minimap");
    let coord = parse_coordinate(args.lat, args.lon)?;
    let zoom = args
        .zoom
        .map(clamp_zoom)
        .unwrap_or(runner.config().map.zoom);

    let renderer = runner.create_renderer(args.backend.map(Into::into))?;
    println!(
        "Rendering {} minimap at zoom {}...",
        renderer.backend(),
        zoom
    );

    let image = runner.block_on(renderer.render(coord, zoom))?;
    write_output(&args.output, &image)?;

    println!("Saved: {} ({} bytes)", args.output.display(), image.len());
    Ok(())
}
