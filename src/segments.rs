/*!
 * Segment adjustment and timecode encoding.
 *
 * Each extracted range is widened or narrowed by the configured frame
 * offsets, clamped at frame 0, converted to seconds at millisecond
 * precision and labelled. Ranges that end up with no duration are skipped
 * and reported, never emitted.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConversionError;
use crate::vdscript::RawRange;

/// Per-run parameters applied to every range
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentParameters {
    /// Frames added before each range (negative values remove frames)
    pub start_offset: i64,

    /// Frames added after each range (negative values remove frames)
    pub end_offset: i64,

    /// Frame rate of the original video
    pub frame_rate: f64,

    /// Label segments as "segment N"
    pub numbering_enabled: bool,
}

impl AdjustmentParameters {
    // @creates: Validated parameters
    pub fn new(
        start_offset: i64,
        end_offset: i64,
        frame_rate: f64,
        numbering_enabled: bool,
    ) -> Result<Self, ConversionError> {
        let params = Self {
            start_offset,
            end_offset,
            frame_rate,
            numbering_enabled,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that the frame rate can be used to compute timecodes
    pub fn validate(&self) -> Result<(), ConversionError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConversionError::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }
}

/// One kept time range of the output cut-list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    // @field: Start time in seconds
    #[serde(rename = "start")]
    pub start_seconds: f64,

    // @field: End time in seconds
    #[serde(rename = "end")]
    pub end_seconds: f64,

    // @field: Segment name, empty unless numbering is enabled
    #[serde(rename = "name")]
    pub label: String,
}

/// Why a range did not produce a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Adjusted end frame is not after the adjusted start frame
    NonPositiveDuration,
    /// Frames differ but both boundaries round to the same millisecond
    CollapsedAfterRounding,
    /// A boundary is too large to be expressed in seconds
    NonFiniteTimecode,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonPositiveDuration => {
                write!(f, "non-positive duration after adjusting frames")
            }
            SkipReason::CollapsedAfterRounding => {
                write!(f, "zero duration after rounding to milliseconds")
            }
            SkipReason::NonFiniteTimecode => {
                write!(f, "a timecode too large to represent in seconds")
            }
        }
    }
}

/// A range that was discarded during adjustment
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRange {
    /// 1-based position of the range in the script
    pub index: usize,
    pub range: RawRange,
    pub adjusted_start: i128,
    pub adjusted_end: i128,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment {} has {} (frames {}..{}). Skipping this segment.",
            self.index, self.reason, self.adjusted_start, self.adjusted_end
        )
    }
}

/// Result of adjusting a whole script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentReport {
    /// Emitted segments in script order
    pub segments: Vec<Segment>,
    /// Discarded ranges in script order
    pub skipped: Vec<SkippedRange>,
    /// Number of ranges processed
    pub ranges_seen: usize,
}

impl AdjustmentReport {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Convert a frame number to seconds, rounded to the millisecond
pub fn frames_to_seconds(frame: i128, frame_rate: f64) -> f64 {
    let seconds = frame as f64 / frame_rate;
    (seconds * 1000.0).round() / 1000.0
}

/// Adjust one range
///
/// `index` is the 1-based position of the range among all ranges of the
/// script and is used for the label whether or not earlier ranges survived.
pub fn adjust_range(
    index: usize,
    range: &RawRange,
    params: &AdjustmentParameters,
) -> Result<Segment, SkippedRange> {
    let start_frame = i128::from(range.start_frame);
    let frame_count = i128::from(range.frame_count);

    let adjusted_start = (start_frame - i128::from(params.start_offset)).max(0);
    let adjusted_end = start_frame + frame_count + i128::from(params.end_offset);

    let skipped = |reason| SkippedRange {
        index,
        range: *range,
        adjusted_start,
        adjusted_end,
        reason,
    };

    if adjusted_end <= adjusted_start {
        return Err(skipped(SkipReason::NonPositiveDuration));
    }

    let start_seconds = frames_to_seconds(adjusted_start, params.frame_rate);
    let end_seconds = frames_to_seconds(adjusted_end, params.frame_rate);

    if !start_seconds.is_finite() || !end_seconds.is_finite() {
        return Err(skipped(SkipReason::NonFiniteTimecode));
    }

    if end_seconds <= start_seconds {
        return Err(skipped(SkipReason::CollapsedAfterRounding));
    }

    let label = if params.numbering_enabled {
        format!("segment {}", index)
    } else {
        String::new()
    };

    Ok(Segment {
        start_seconds,
        end_seconds,
        label,
    })
}

/// Adjust every range of a script, in order
///
/// The frame rate is checked before any range is touched. Skipped ranges are
/// logged as warnings and collected in the report; they never abort the run.
pub fn adjust_ranges(
    ranges: &[RawRange],
    params: &AdjustmentParameters,
) -> Result<AdjustmentReport, ConversionError> {
    params.validate()?;

    let mut report = AdjustmentReport {
        ranges_seen: ranges.len(),
        ..Default::default()
    };

    for (offset, range) in ranges.iter().enumerate() {
        let index = offset + 1;
        match adjust_range(index, range, params) {
            Ok(segment) => {
                debug!(
                    "Segment {}: {} -> {:.3}s..{:.3}s",
                    index, range, segment.start_seconds, segment.end_seconds
                );
                report.segments.push(segment);
            }
            Err(skipped) => {
                warn!("{}", skipped);
                report.skipped.push(skipped);
            }
        }
    }

    Ok(report)
}
