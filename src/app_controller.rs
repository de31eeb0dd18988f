use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::ConversionError;
use crate::file_utils::FileManager;
use crate::llc::LlcProject;
use crate::segments::{self, AdjustmentParameters, SkippedRange};
use crate::vdscript;

// @module: Application controller for script conversion

// @const: Input and output extensions
pub const VDSCRIPT_EXTENSION: &str = "vdscript";
pub const LLC_EXTENSION: &str = "llc";

/// Outcome of converting one script in memory
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Project ready to be written
    pub project: LlcProject,
    /// Ranges dropped during adjustment
    pub skipped: Vec<SkippedRange>,
    /// Number of ranges found in the script
    pub ranges_seen: usize,
}

/// Counters for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Main application controller for script conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Parameters derived from the configuration
    params: AdjustmentParameters,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let params = config.adjustment_parameters()?;

        Ok(Self { config, params })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default media file name for a script: `<stem>.<media_extension>`
    pub fn default_media_file_name(&self, input_file: &Path) -> String {
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        format!(
            "{}.{}",
            stem,
            self.config.media_extension.trim_start_matches('.')
        )
    }

    /// Convert script text into a project without touching the filesystem
    pub fn convert_script(
        &self,
        content: &str,
        media_file_name: &str,
    ) -> Result<ConversionOutcome, ConversionError> {
        let ranges = vdscript::parse_str(content);
        let report = segments::adjust_ranges(&ranges, &self.params)?;

        if report.is_empty() {
            return Err(ConversionError::NoValidSegments);
        }

        Ok(ConversionOutcome {
            project: LlcProject::new(media_file_name, report.segments),
            skipped: report.skipped,
            ranges_seen: report.ranges_seen,
        })
    }

    /// Convert one script file and write the project
    ///
    /// `output_file` defaults to the input path with an `.llc` extension and
    /// `media_file_name` to [`Controller::default_media_file_name`]. Returns
    /// the path that was written.
    pub fn run(
        &self,
        input_file: &Path,
        output_file: Option<&Path>,
        media_file_name: Option<&str>,
    ) -> Result<PathBuf> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => FileManager::generate_output_path(
                input_file,
                input_file.parent().unwrap_or(Path::new("")),
                LLC_EXTENSION,
            ),
        };

        // Fail before doing any work if the destination is taken
        if output_path.exists() {
            return Err(ConversionError::OutputExists(output_path).into());
        }

        let media_file_name = media_file_name
            .map(str::to_string)
            .unwrap_or_else(|| self.default_media_file_name(input_file));

        debug!(
            "Converting {:?} at {} fps (start {:+}, end {:+} frames)",
            input_file, self.params.frame_rate, self.params.start_offset, self.params.end_offset
        );

        let content = FileManager::read_to_string(input_file)?;
        let outcome = self.convert_script(&content, &media_file_name)?;

        let json = outcome.project.to_json_pretty()?;
        FileManager::write_new_file(&output_path, &json)?;

        if outcome.skipped.is_empty() {
            info!(
                "LosslessCut file saved as {:?} ({} segment(s))",
                output_path,
                outcome.project.cut_segments.len()
            );
        } else {
            warn!(
                "LosslessCut file saved as {:?} ({} of {} segment(s), {} skipped)",
                output_path,
                outcome.project.cut_segments.len(),
                outcome.ranges_seen,
                outcome.skipped.len()
            );
        }

        Ok(output_path)
    }

    /// Convert every script under a directory, writing each project next to its script
    pub fn run_folder(&self, input_dir: &Path) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Converting scripts in directory: {:?}", input_dir);

        let scripts = FileManager::find_files(input_dir, VDSCRIPT_EXTENSION)?;
        if scripts.is_empty() {
            warn!("No .{} files found in {:?}", VDSCRIPT_EXTENSION, input_dir);
        }

        let mut summary = FolderSummary::default();
        for script in &scripts {
            match self.run(script, None, None) {
                Ok(_) => summary.converted += 1,
                Err(e) => {
                    error!("Error processing {:?}: {}", script, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} converted, {} failed",
            summary.converted, summary.failed
        );

        Ok(summary)
    }
}
