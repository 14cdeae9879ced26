//! Toolkit installation discovery.
//!
//! Locates the metadata file written by the installer, validates it against
//! any explicit platform request from the environment, and resolves the
//! backend compiler directory. All filesystem probing lives here so the
//! classification pipeline never touches the disk.

use std::path::{Path, PathBuf};

use log::debug;

use crate::env::EnvVariables;
use crate::error::DriverError;
use crate::metadata::{self, ToolchainInfo, METADATA_FILE};

/// Runtime identifier a usable installation must report.
pub const EXPECTED_RUNTIME: &str = "spirv";

/// Platform names accepted from `SPVCC_PLATFORM`.
const ACCEPTED_PLATFORMS: [&str; 2] = ["spirv", "intel"];

/// A detected toolkit installation.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Parsed metadata record.
    pub info: ToolchainInfo,
    /// Root of the toolkit install, parent of the `share` directory.
    pub install_dir: PathBuf,
    /// Directory holding the backend compiler binaries.
    pub compiler_dir: PathBuf,
}

impl Platform {
    /// Public header directory forced into every synthesized command.
    pub fn include_dir(&self) -> PathBuf {
        self.install_dir.join("include")
    }

    /// Backend compiler executable. Prefers the full `clang++` driver and
    /// falls back to plain `clang` when it is absent on disk.
    pub fn compiler_executable(&self) -> PathBuf {
        let preferred = self.compiler_dir.join("clang++");
        if preferred.exists() {
            preferred
        } else {
            self.compiler_dir.join("clang")
        }
    }
}

/// Locates a usable installation.
///
/// The metadata file is probed first in the `share` directory next to the
/// running binary, then under `$SPVCC_PATH/share`. Detection succeeds when
/// the metadata reports the expected runtime.
pub fn detect(env: &EnvVariables) -> Result<Platform, DriverError> {
    let mut found: Option<(ToolchainInfo, PathBuf)> = None;

    if let Some(share) = exe_share_dir() {
        if let Some(info) = metadata::read_info(&share)? {
            found = Some((info, share));
        }
    }
    if found.is_none() {
        if let Some(install) = &env.install_path {
            let share = Path::new(install).join("share");
            if let Some(info) = metadata::read_info(&share)? {
                found = Some((info, share));
            }
        }
    }

    match found {
        Some((info, share)) if info.runtime == EXPECTED_RUNTIME => {
            check_platform_request(env)?;
            let install_dir = share.parent().unwrap_or(Path::new("/")).to_path_buf();
            let compiler_dir = resolve_compiler_dir(env, &info)?;
            debug!(
                "detected {} toolkit at {}",
                EXPECTED_RUNTIME,
                install_dir.display()
            );
            Ok(Platform {
                info,
                install_dir,
                compiler_dir,
            })
        }
        _ => Err(not_detected(env)),
    }
}

/// An explicit platform request must agree with what was detected.
fn check_platform_request(env: &EnvVariables) -> Result<(), DriverError> {
    match &env.platform {
        Some(platform) if !ACCEPTED_PLATFORMS.contains(&platform.as_str()) => {
            Err(DriverError::Config(format!(
                "a {} installation was found, which conflicts with SPVCC_PLATFORM={} \
                 set in the current environment",
                EXPECTED_RUNTIME, platform
            )))
        }
        _ => Ok(()),
    }
}

/// The backend compiler directory comes from the environment override when
/// present, otherwise from the metadata record. The override is error-checked
/// so a stale path fails loudly instead of producing a confusing child error.
fn resolve_compiler_dir(
    env: &EnvVariables,
    info: &ToolchainInfo,
) -> Result<PathBuf, DriverError> {
    if let Some(dir) = &env.clang_path {
        let probe = Path::new(dir).join("llvm-config");
        if !probe.exists() {
            return Err(DriverError::Config(format!(
                "SPVCC_CLANG_PATH was set in the environment ({}) but llvm-config \
                 was not found in {}",
                dir,
                probe.display()
            )));
        }
        return Ok(PathBuf::from(dir));
    }
    if info.compiler_dir.is_empty() {
        return Err(DriverError::Config(format!(
            "{} does not name a backend compiler directory and SPVCC_CLANG_PATH is not set",
            METADATA_FILE
        )));
    }
    Ok(PathBuf::from(&info.compiler_dir))
}

fn not_detected(env: &EnvVariables) -> DriverError {
    if env.platform.is_some() && env.install_path.is_none() {
        DriverError::Config(
            "setting SPVCC_PLATFORM requires setting SPVCC_PATH to the toolkit install directory"
                .to_string(),
        )
    } else if let Some(install) = &env.install_path {
        DriverError::Config(format!(
            "{} (written during toolkit install) was not found in {}/share",
            METADATA_FILE, install
        ))
    } else {
        DriverError::Config(format!(
            "no {} toolkit installation detected; set SPVCC_PATH to the install directory",
            EXPECTED_RUNTIME
        ))
    }
}

/// `share` directory expected next to the running binary's parent directory.
fn exe_share_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("../share"))
}
