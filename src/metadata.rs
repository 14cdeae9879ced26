//! Toolchain metadata, written by the installer as a small `KEY=VALUE` file
//! and read back once per invocation.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::DriverError;

/// Name of the metadata file inside the install's `share` directory.
pub const METADATA_FILE: &str = ".offloadInfo";

pub const KEY_RUNTIME: &str = "OFFLOAD_RUNTIME";
pub const KEY_COMPILE_OPTIONS: &str = "OFFLOAD_COMPILE_OPTIONS";
pub const KEY_LINK_OPTIONS: &str = "OFFLOAD_LINK_OPTIONS";
pub const KEY_RDC_SUPPLEMENT_LINK_OPTIONS: &str = "OFFLOAD_RDC_SUPPLEMENT_LINK_OPTIONS";
pub const KEY_COMPILER_DIR: &str = "OFFLOAD_CLANG_PATH";

/// Container for the parsed metadata file.
///
/// Immutable for the duration of one invocation once loaded.
#[derive(Debug, Default, Clone)]
pub struct ToolchainInfo {
    /// Runtime identifier, e.g. `spirv`.
    pub runtime: String,
    /// Compile flags for C++ and kernel sources.
    pub compile_flags: String,
    /// Link flags for link-only and full builds.
    pub link_flags: String,
    /// Extra link flags needed when linking separable-compilation artifacts.
    pub rdc_supplement_link_flags: String,
    /// Directory holding the backend compiler binaries.
    pub compiler_dir: String,
}

impl ToolchainInfo {
    /// Parses one `KEY=VALUE` line. Unknown keys are ignored; a key repeated
    /// on a later line overwrites the earlier value.
    pub fn parse_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        match key {
            KEY_RUNTIME => self.runtime = value.to_string(),
            KEY_COMPILE_OPTIONS => self.compile_flags = value.to_string(),
            KEY_LINK_OPTIONS => self.link_flags = value.to_string(),
            KEY_RDC_SUPPLEMENT_LINK_OPTIONS => {
                self.rdc_supplement_link_flags = value.to_string()
            }
            KEY_COMPILER_DIR => self.compiler_dir = value.to_string(),
            _ => {}
        }
    }

    /// Pulls an embedded `-x <lang>` directive out of the compile-flag string.
    ///
    /// Installer builds embed the directive so the raw flag string stays
    /// usable with a bare compiler invocation. The driver positions language
    /// markers per source bucket itself, so the directive must not remain in
    /// the per-language flags; it is re-emitted near the front of the final
    /// command instead.
    pub fn extract_lang_fixup(&mut self) -> Option<String> {
        let tokens: Vec<&str> = self.compile_flags.split_whitespace().collect();
        let pos = tokens.windows(2).position(|w| w[0] == "-x")?;
        let fixup = format!("-x {}", tokens[pos + 1]);
        let mut kept: Vec<&str> = Vec::with_capacity(tokens.len().saturating_sub(2));
        kept.extend(&tokens[..pos]);
        kept.extend(&tokens[pos + 2..]);
        self.compile_flags = kept.join(" ");
        Some(fixup)
    }
}

/// Reads the metadata file from a `share` directory.
///
/// Returns `Ok(None)` when the file does not exist there.
pub fn read_info(share_dir: &Path) -> Result<Option<ToolchainInfo>, DriverError> {
    let path = share_dir.join(METADATA_FILE);
    if !path.exists() {
        return Ok(None);
    }
    debug!("reading toolchain metadata from {}", path.display());

    let mut info = ToolchainInfo::default();
    let contents = fs::read_to_string(&path)?;
    for line in contents.lines() {
        info.parse_line(line);
    }
    Ok(Some(info))
}
