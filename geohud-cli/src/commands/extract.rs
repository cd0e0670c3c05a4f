//! Extract command - print the coordinate found in piped text.

use geohud::extract::extract_with_kind;
use tracing::debug;

use super::common::read_stdin;
use crate::error::CliError;

/// Run the extract command.
///
/// Exits with an error when the input holds no coordinate.
pub fn run() -> Result<(), CliError> {
    let input = read_stdin()?;
    let (coord, kind) = extract_with_kind(&input).ok_or(CliError::NoCoordinate)?;
    debug!(coord = %coord, kind = ?kind, "Extracted coordinate");
    println!("{}", coord);
    Ok(())
}
