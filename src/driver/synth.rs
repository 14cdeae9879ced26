//! Command synthesis.
//!
//! Assembles the final backend-compiler invocation from the classified
//! buckets, the injected toolchain configuration, and the passthrough
//! tokens. The backend resolves conflicting flags by last-occurrence-wins,
//! so the emission order below is a compatibility contract, not a styling
//! choice.

use itertools::Itertools;
use log::debug;

use super::options::{InvocationOptions, Lang};

/// Configuration injected into the synthesizer.
///
/// Assembled by the driver from platform detection, the metadata record, and
/// the environment flag appends; the synthesizer itself never reads global
/// state.
#[derive(Debug, Default, Clone)]
pub struct SynthConfig {
    /// Backend compiler executable path.
    pub compiler: String,
    /// Toolkit public header directory, forced into every command.
    pub include_dir: String,
    /// Compile flags for C++ and kernel sources.
    pub cxxflags: String,
    /// Compile flags for C sources.
    pub cflags: String,
    /// Link flags, appended once unless compiling only.
    pub ldflags: String,
    /// Extra link flags for linking separable-compilation artifacts.
    pub rdc_supplement_ldflags: String,
    /// Language directive extracted from the metadata compile flags at
    /// initialization, if the install carried one.
    pub lang_fixup: Option<String>,
}

/// Language buckets in emission order, each with its flag-string selector.
fn lang_segments(cfg: &SynthConfig) -> [(Lang, &str); 3] {
    [
        (Lang::Kernel, cfg.cxxflags.as_str()),
        (Lang::Cxx, cfg.cxxflags.as_str()),
        (Lang::C, cfg.cflags.as_str()),
    ]
}

/// Builds the one command string handed to the process executor.
pub fn synthesize(
    opts: &InvocationOptions,
    cfg: &SynthConfig,
    passthrough: &[String],
) -> String {
    let mut parts: Vec<String> = vec![cfg.compiler.clone()];

    if opts.rdc.is_present() && opts.link_only && !cfg.rdc_supplement_ldflags.is_empty() {
        parts.push(cfg.rdc_supplement_ldflags.clone());
    }

    if let Some(fixup) = &cfg.lang_fixup {
        parts.push(fixup.clone());
    }

    // always present so the runtime API headers resolve without user action
    parts.push(format!("-isystem {}", cfg.include_dir));

    parts.extend(passthrough.iter().cloned());
    parts.extend(opts.objects.files().iter().cloned());

    for (lang, flags) in lang_segments(cfg) {
        let bucket = opts.bucket(lang);
        if !bucket.is_present() {
            continue;
        }
        parts.push(lang.marker().to_string());
        parts.extend(bucket.files().iter().cloned());
        if !flags.is_empty() {
            parts.push(flags.to_string());
        }
    }

    parts.extend(opts.output.values().iter().cloned());

    if !opts.compile_only.is_present() && !cfg.ldflags.is_empty() {
        parts.push(cfg.ldflags.clone());
    }

    parts.extend(opts.dep_target.values().iter().cloned());
    parts.extend(opts.dep_file.values().iter().cloned());

    let cmd = parts.iter().filter(|p| !p.is_empty()).join(" ");
    debug!("synthesized command: {}", cmd);
    cmd
}
