//! Cross-platform path utilities for Parlo.
//!
//! Single source of truth for where Parlo keeps its configuration, its
//! per-turn audio scratch files, and exported session logs.
//!
//! # Platform Behavior
//!
//! | Platform | Data Directory |
//! |----------|----------------|
//! | Linux    | `~/.local/share/parlo` |
//! | macOS    | `~/Library/Application Support/parlo` |
//! | Windows  | `%APPDATA%/parlo` |

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

/// Errors specific to path operations.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Could not determine data directory")]
    NoDataDirectory,

    #[error("Could not create directory: {0}")]
    DirectoryCreation(PathBuf),
}

/// Application identifier used in path construction.
const APP_NAME: &str = "parlo";

/// File name of the transient recording uploaded for transcription.
const INPUT_WAV_NAME: &str = "input.wav";

/// File name of the transient synthesized reply.
const REPLY_MP3_NAME: &str = "reply.mp3";

/// Get the application data directory.
///
/// Creates the directory if it doesn't exist with secure permissions (0o700).
///
/// # Errors
/// Returns an error if the directory cannot be determined or created.
pub fn get_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().ok_or(PathError::NoDataDirectory)?;
    let data_dir = base_dir.join(APP_NAME);

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&data_dir, perms)
                .with_context(|| format!("Failed to set permissions on {}", data_dir.display()))?;
        }
    }

    Ok(data_dir)
}

/// Get the configuration directory.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/parlo`
/// - **macOS**/**Windows**: config lives with data
pub fn get_config_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let config_base = dirs::config_dir().ok_or(PathError::NoDataDirectory)?;
        let config_dir = config_base.join(APP_NAME);

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    config_dir.display()
                )
            })?;

            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&config_dir, perms).ok();
        }

        Ok(config_dir)
    }

    #[cfg(not(target_os = "linux"))]
    {
        get_data_dir()
    }
}

/// Get the scratch directory holding the per-turn transient audio files.
///
/// All platforms: `<data_dir>/scratch`. Both files in it are overwritten on
/// every interaction.
pub fn get_scratch_dir() -> Result<PathBuf> {
    let data_dir = get_data_dir()?;
    let scratch_dir = data_dir.join("scratch");

    if !scratch_dir.exists() {
        fs::create_dir_all(&scratch_dir).with_context(|| {
            format!(
                "Failed to create scratch directory: {}",
                scratch_dir.display()
            )
        })?;
    }

    Ok(scratch_dir)
}

/// Get the directory session logs are exported into.
///
/// All platforms: `<data_dir>/exports`.
pub fn get_export_dir() -> Result<PathBuf> {
    let data_dir = get_data_dir()?;
    let export_dir = data_dir.join("exports");

    if !export_dir.exists() {
        fs::create_dir_all(&export_dir).with_context(|| {
            format!(
                "Failed to create export directory: {}",
                export_dir.display()
            )
        })?;
    }

    Ok(export_dir)
}

/// Path of the transient WAV file handed to the transcription service.
pub fn get_input_wav_path() -> Result<PathBuf> {
    Ok(get_scratch_dir()?.join(INPUT_WAV_NAME))
}

/// Path of the transient MP3 file written by speech synthesis.
pub fn get_reply_mp3_path() -> Result<PathBuf> {
    Ok(get_scratch_dir()?.join(REPLY_MP3_NAME))
}

// ============================================================================
// Simple API (non-Result versions for contexts where errors are fatal)
// ============================================================================

/// Get the data directory, panicking on failure.
pub fn data_dir() -> PathBuf {
    get_data_dir().expect("Failed to determine data directory")
}

/// Get the config directory, panicking on failure.
pub fn config_dir() -> PathBuf {
    get_config_dir().expect("Failed to determine config directory")
}

/// Get the scratch directory, panicking on failure.
pub fn scratch_dir() -> PathBuf {
    get_scratch_dir().expect("Failed to determine scratch directory")
}

/// Get the export directory, panicking on failure.
pub fn export_dir() -> PathBuf {
    get_export_dir().expect("Failed to determine export directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_creation() {
        let dir = get_data_dir().expect("Should get data directory");
        assert!(dir.exists(), "Data directory should exist");
        assert!(dir.ends_with("parlo"), "Should end with app name");
    }

    #[test]
    fn test_scratch_paths() {
        let wav = get_input_wav_path().expect("Should get wav path");
        let mp3 = get_reply_mp3_path().expect("Should get mp3 path");
        assert!(wav.ends_with("input.wav"));
        assert!(mp3.ends_with("reply.mp3"));
        assert_eq!(wav.parent(), mp3.parent());
    }

    #[test]
    fn test_export_dir() {
        let dir = get_export_dir().expect("Should get export directory");
        assert!(dir.exists(), "Export directory should exist");
        assert!(dir.ends_with("exports"), "Should end with 'exports'");
    }

    #[test]
    fn test_simple_api() {
        // These should not panic
        let _ = data_dir();
        let _ = config_dir();
        let _ = scratch_dir();
        let _ = export_dir();
    }
}
