use serde::{Deserialize, Serialize};

use crate::errors::ConversionError;
use crate::segments::Segment;

// @module: LosslessCut project document

// @const: Project format version written by this tool
pub const LLC_VERSION: u32 = 1;

/// LosslessCut `.llc` project listing the segments to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlcProject {
    // @field: Format version, always 1
    pub version: u32,

    // @field: Media file the cuts apply to
    pub media_file_name: String,

    // @field: Kept segments in playback order
    pub cut_segments: Vec<Segment>,
}

impl LlcProject {
    pub fn new(media_file_name: impl Into<String>, cut_segments: Vec<Segment>) -> Self {
        LlcProject {
            version: LLC_VERSION,
            media_file_name: media_file_name.into(),
            cut_segments,
        }
    }

    /// Encode as 2-space indented JSON
    pub fn to_json_pretty(&self) -> Result<String, ConversionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a project from JSON
    pub fn from_json(content: &str) -> Result<Self, ConversionError> {
        Ok(serde_json::from_str(content)?)
    }
}
