//! Environment configuration, read once at startup and passed around as plain
//! values so the pipeline stages stay free of hidden process-wide state.

/// Environment variables recognized by the driver.
#[derive(Debug, Default, Clone)]
pub struct EnvVariables {
    /// `SPVCC_VERBOSE`: verbosity bitmask, see the `logger` module.
    pub verbose: Option<String>,
    /// `SPVCC_PLATFORM`: explicit platform request, checked against the
    /// detected installation.
    pub platform: Option<String>,
    /// `SPVCC_PATH`: toolkit install directory to probe for metadata.
    pub install_path: Option<String>,
    /// `SPVCC_CLANG_PATH`: backend compiler directory override.
    pub clang_path: Option<String>,
    /// `SPVCC_COMPILE_FLAGS_APPEND`: extra compile flags, merged into the
    /// per-language flag strings before synthesis.
    pub compile_flags_append: Option<String>,
    /// `SPVCC_LINK_FLAGS_APPEND`: extra link flags.
    pub link_flags_append: Option<String>,
}

impl EnvVariables {
    /// Reads the driver's environment variables from the current process.
    pub fn from_process() -> Self {
        Self {
            verbose: read("SPVCC_VERBOSE"),
            platform: read("SPVCC_PLATFORM"),
            install_path: read("SPVCC_PATH"),
            clang_path: read("SPVCC_CLANG_PATH"),
            compile_flags_append: read("SPVCC_COMPILE_FLAGS_APPEND"),
            link_flags_append: read("SPVCC_LINK_FLAGS_APPEND"),
        }
    }

    /// Parsed verbosity bitmask, zero when unset or unparsable.
    pub fn verbose_mask(&self) -> u32 {
        self.verbose
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
fn read(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
