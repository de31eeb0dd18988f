/*!
 * # vdscript2llc - VirtualDub script to LosslessCut project converter
 *
 * Cut a video roughly on a low-resolution proxy in VirtualDub, then apply
 * exactly the same cuts to the full-resolution original in LosslessCut.
 *
 * ## Features
 *
 * - Read the kept ranges (`VirtualDub.subset.AddRange(start,count);`) of a
 *   `.vdscript` file
 * - Add or remove frames at the start and/or end of every cut to compensate
 *   for keyframe misalignment between proxy and original
 * - Never produce negative start frames or zero-length segments
 * - Optional "segment N" names aligned with the ranges of the script
 * - Write a LosslessCut `.llc` project, refusing to overwrite existing files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `vdscript`: Range extraction from script lines
 * - `segments`: Frame adjustment, validation and conversion to seconds
 * - `llc`: The LosslessCut project document
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod llc;
pub mod segments;
pub mod vdscript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::ConversionError;
pub use llc::LlcProject;
pub use segments::{AdjustmentParameters, AdjustmentReport, Segment, SkipReason, SkippedRange};
pub use vdscript::RawRange;
