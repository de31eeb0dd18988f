/*!
 * Error types for the vdscript2llc conversion.
 *
 * Conversion failures are modelled with thiserror so callers can tell a bad
 * configuration apart from a run that simply produced nothing. Per-range
 * problems are not errors at all: they are reported as skipped ranges by the
 * segment adjuster and the run carries on.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a conversion run
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Frame rate is zero, negative or not a finite number
    #[error("Invalid frame rate: {0} (must be a finite number greater than 0)")]
    InvalidFrameRate(f64),

    /// Every range was discarded, or the script contained no ranges at all
    #[error("No valid segments to write to the LosslessCut file")]
    NoValidSegments,

    /// Destination file is already present and will not be overwritten
    #[error("The file {} already exists. Please choose a different filename or remove the existing file", .0.display())]
    OutputExists(PathBuf),

    /// Error from a file operation
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while encoding or decoding a project document
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConversionError {
    /// Whether the error stems from the run's parameters rather than its input
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidFrameRate(_))
    }
}
