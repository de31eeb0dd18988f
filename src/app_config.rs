/*!
 * Application configuration.
 *
 * Handles loading, validating and saving the conversion settings kept in
 * `conf.json`, and merging command line overrides into them.
 */

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::segments::AdjustmentParameters;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Frame rate of the original video (e.g. 23.976, 25)
    #[serde(default = "default_fps")]
    pub fps: f64,

    /// Frames to add (or remove, when negative) at the beginning of each cut
    #[serde(default)]
    pub extra_frames_start: i64,

    /// Frames to add (or remove, when negative) at the end of each cut
    ///
    /// Extra frames past the last frame of the video are harmless: LosslessCut
    /// shows them but exports the segment up to the real end.
    #[serde(default)]
    pub extra_frames_end: i64,

    /// Name each cut "segment 1", "segment 2", ...
    #[serde(default)]
    pub add_segment_number: bool,

    /// Extension of the original media file, used when no media file name is given
    #[serde(default = "default_media_extension")]
    pub media_extension: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_fps() -> f64 {
    25.0
}

fn default_media_extension() -> String {
    "mp4".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(anyhow!(
                "Frame rate must be a number greater than 0, got {}",
                self.fps
            ));
        }

        if self.media_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("Media extension must not be empty"));
        }

        Ok(())
    }

    /// Parameters applied to every range of a script
    pub fn adjustment_parameters(&self) -> Result<AdjustmentParameters> {
        let params = AdjustmentParameters::new(
            self.extra_frames_start,
            self.extra_frames_end,
            self.fps,
            self.add_segment_number,
        )?;
        Ok(params)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            fps: default_fps(),
            extra_frames_start: 0,
            extra_frames_end: 0,
            add_segment_number: false,
            media_extension: default_media_extension(),
            log_level: LogLevel::default(),
        }
    }
}
