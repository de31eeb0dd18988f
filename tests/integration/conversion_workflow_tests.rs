/*!
 * Integration tests for converting a single script into a project file
 */

use anyhow::Result;
use std::fs;
use vdscript2llc::app_config::Config;
use vdscript2llc::app_controller::Controller;
use vdscript2llc::errors::ConversionError;
use vdscript2llc::llc::LlcProject;
use crate::common;

fn keyframe_corrected_config() -> Config {
    Config {
        fps: 25.0,
        extra_frames_start: -4,
        extra_frames_end: -5,
        add_segment_number: true,
        ..Config::default()
    }
}

/// Test the full workflow: script on disk to .llc next to it
#[test]
fn test_run_withProxyEditScript_shouldWriteExpectedProject() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let script = temp_dir.path().join("proxy_edit.vdscript");
    fs::copy(common::test_resource_path("proxy_edit.vdscript"), &script)?;

    let controller = Controller::with_config(keyframe_corrected_config())?;
    let written = controller.run(&script, None, None)?;

    assert_eq!(written, temp_dir.path().join("proxy_edit.llc"));

    let expected = r#"{
  "version": 1,
  "mediaFileName": "proxy_edit.mp4",
  "cutSegments": [
    {
      "start": 0.16,
      "end": 4.6,
      "name": "segment 1"
    },
    {
      "start": 16.64,
      "end": 24.6,
      "name": "segment 2"
    },
    {
      "start": 80.16,
      "end": 89.8,
      "name": "segment 4"
    }
  ]
}"#;
    assert_eq!(fs::read_to_string(&written)?, expected);

    Ok(())
}

/// Test explicit output path and media file name
#[test]
fn test_run_withExplicitOutputAndMedia_shouldUseThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_test_script(temp_dir.path(), "cuts.vdscript")?;
    let output = temp_dir.path().join("exports").join("final.llc");

    let controller = Controller::with_config(Config::default())?;
    let written = controller.run(&script, Some(output.as_path()), Some("original 4K.mov"))?;

    assert_eq!(written, output);
    let project = LlcProject::from_json(&fs::read_to_string(&output)?)?;
    assert_eq!(project.media_file_name, "original 4K.mov");
    assert_eq!(project.cut_segments.len(), 2);
    assert!(project.cut_segments.iter().all(|s| s.label.is_empty()));

    Ok(())
}

/// Test that an existing destination is left untouched
#[test]
fn test_run_withExistingOutput_shouldRefuseToOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_test_script(temp_dir.path(), "cuts.vdscript")?;
    let existing = common::create_test_file(temp_dir.path(), "cuts.llc", "keep me")?;

    let controller = Controller::with_config(Config::default())?;
    let error = controller.run(&script, None, None).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ConversionError>(),
        Some(ConversionError::OutputExists(_))
    ));
    assert_eq!(fs::read_to_string(&existing)?, "keep me");

    Ok(())
}

/// Test that a run without surviving segments writes nothing
#[test]
fn test_run_withAllSegmentsDiscarded_shouldNotWriteFile() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_test_script(temp_dir.path(), "cuts.vdscript")?;

    let config = Config {
        extra_frames_start: -100_000,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let error = controller.run(&script, None, None).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ConversionError>(),
        Some(ConversionError::NoValidSegments)
    ));
    assert!(!temp_dir.path().join("cuts.llc").exists());

    Ok(())
}

/// Test that a missing input is reported
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run(&temp_dir.path().join("missing.vdscript"), None, None);
    assert!(result.is_err());

    Ok(())
}

/// Test that converting the same script twice produces byte-identical documents
#[test]
fn test_convert_script_twice_shouldProduceIdenticalJson() -> Result<()> {
    let controller = Controller::with_config(keyframe_corrected_config())?;
    let content = fs::read_to_string(common::test_resource_path("proxy_edit.vdscript"))?;

    let first = controller.convert_script(&content, "a.mp4")?.project.to_json_pretty()?;
    let second = controller.convert_script(&content, "a.mp4")?.project.to_json_pretty()?;

    assert_eq!(first, second);

    Ok(())
}
