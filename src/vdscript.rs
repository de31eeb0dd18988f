use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// @module: VirtualDub script range extraction

// @const: Kept-range line, anchored at the start of the line
static ADD_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^VirtualDub\.subset\.AddRange\(([0-9]+),([0-9]+)\);").unwrap()
});

/// One kept range from a VirtualDub script, in source frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRange {
    // @field: First frame of the range
    pub start_frame: u64,

    // @field: Number of frames in the range
    pub frame_count: u64,
}

impl RawRange {
    pub fn new(start_frame: u64, frame_count: u64) -> Self {
        RawRange {
            start_frame,
            frame_count,
        }
    }
}

impl fmt::Display for RawRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AddRange({},{})", self.start_frame, self.frame_count)
    }
}

/// Parse a single script line
///
/// Returns `None` for every line that is not a `VirtualDub.subset.AddRange(start,count);`
/// statement starting in the first column.
pub fn parse_line(line: &str) -> Option<RawRange> {
    let caps = ADD_RANGE_REGEX.captures(line)?;

    // The pattern only admits digits, so the sole failure left is overflow
    let start_frame = caps[1].parse::<u64>();
    let frame_count = caps[2].parse::<u64>();

    match (start_frame, frame_count) {
        (Ok(start_frame), Ok(frame_count)) => Some(RawRange::new(start_frame, frame_count)),
        _ => {
            debug!("Ignoring range with out-of-range frame numbers: {}", line.trim_end());
            None
        }
    }
}

/// Extract all kept ranges from a sequence of lines, in order
pub fn parse_lines<I, S>(lines: I) -> Vec<RawRange>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| parse_line(line.as_ref()))
        .collect()
}

/// Extract all kept ranges from the full text of a script
pub fn parse_str(content: &str) -> Vec<RawRange> {
    let ranges = parse_lines(content.lines());
    debug!("Found {} range(s) in script", ranges.len());
    ranges
}
