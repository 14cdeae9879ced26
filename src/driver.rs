//! Compiler driver module.
//!
//! Orchestrates one invocation end to end: argument filtering, the
//! classification pipeline, flag-string assembly, the print-only modes, and
//! finally the backend compiler subprocess.

pub mod flags;
pub mod options;
pub mod sources;
pub mod synth;
pub mod tokenizer;

#[cfg(test)]
mod tests_classify;

use std::io::Write;

use itertools::Itertools;
use log::debug;

use crate::env::EnvVariables;
use crate::error::DriverError;
use crate::exec;
use crate::logger::{Logger, VERBOSE_ARGS, VERBOSE_COMMANDS, VERBOSE_PATHS};
use crate::platform::{self, Platform};

use self::options::InvocationOptions;
use self::synth::SynthConfig;

/// Platform define injected through the per-language compile flags.
pub const PLATFORM_DEFINE: &str = "-D__OFFLOAD_PLATFORM_SPIRV__";

/// Arguments filtered from the incoming command line before classification.
///
/// Builds that feed the driver the output of the config helper's
/// `--cpp_flags` would otherwise duplicate the offload marker and the
/// platform define, both of which the driver injects itself from the
/// authoritative configuration.
pub fn default_excluded_args() -> Vec<String> {
    [
        "--offload=spirv64",
        PLATFORM_DEFINE,
        "-D__OFFLOAD_PLATFORM_SPIRV__=",
        "-D__OFFLOAD_PLATFORM_SPIRV__=1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Main compiler driver.
pub struct Driver {
    env: EnvVariables,
    logger: Logger,
    excluded_args: Vec<String>,
}

impl Driver {
    /// Creates a driver with the default duplicate-guard filter.
    pub fn new(env: EnvVariables) -> Self {
        Self::with_excluded_args(env, default_excluded_args())
    }

    /// Creates a driver with an explicit duplicate-guard filter, so the
    /// policy can be varied without touching global state.
    pub fn with_excluded_args(env: EnvVariables, excluded_args: Vec<String>) -> Self {
        let logger = Logger::new(env.verbose_mask());
        Driver {
            env,
            logger,
            excluded_args,
        }
    }

    /// Runs one invocation. `argv` excludes the program name.
    ///
    /// Returns the process exit code: 0 for the print-only modes and the
    /// empty-argument no-op, otherwise the backend compiler's own code.
    pub fn run(&self, argv: &[String]) -> Result<i32, DriverError> {
        let args: Vec<String> = argv
            .iter()
            .filter(|a| !self.excluded_args.contains(a))
            .cloned()
            .collect();

        if args.is_empty() {
            println!("no arguments passed, exiting ...");
            return Ok(0);
        }

        if self.logger.enabled(VERBOSE_ARGS) {
            self.logger
                .log(VERBOSE_ARGS, &format!("spvcc-args: {}", args.iter().join(" ")));
        }

        let mut opts = InvocationOptions::default();
        let tokens = tokenizer::normalize(&args);
        let residual = flags::classify_flags(tokens, &mut opts);
        let passthrough = sources::classify_sources(residual, &mut opts)?;

        let platform = platform::detect(&self.env)?;
        let cfg = self.build_synth_config(&platform);
        self.log_paths(&platform, &cfg);

        if opts.print_version.is_present() {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        if opts.print_cxxflags.is_present() {
            print!("{}", cfg.cxxflags);
        }
        if opts.print_ldflags.is_present() {
            print!("{}", cfg.ldflags);
        }
        if !opts.run_cmd {
            // the flag strings are printed without a trailing newline; the
            // process exits right after, so flush explicitly
            std::io::stdout().flush()?;
            return Ok(0);
        }

        let cmd = synth::synthesize(&opts, &cfg, &passthrough);
        self.logger
            .log(VERBOSE_COMMANDS, &format!("spvcc-cmd: {}", cmd));

        debug!("executing backend compiler");
        let result = exec::run_shell(&cmd)?;
        print!("{}", result.output);
        if result.exit_code != 0 {
            println!("failed to execute: {}", cmd);
        }
        std::io::stdout().flush()?;
        Ok(result.exit_code)
    }

    /// Merges metadata flag strings with the environment appends into the
    /// synthesizer's explicit parameter structure.
    fn build_synth_config(&self, platform: &Platform) -> SynthConfig {
        let mut info = platform.info.clone();
        let lang_fixup = info.extract_lang_fixup();

        let mut cxxflags = info.compile_flags;
        let mut cflags = PLATFORM_DEFINE.to_string();
        let mut ldflags = info.link_flags;

        if let Some(append) = &self.env.compile_flags_append {
            push_flags(&mut cxxflags, append);
            push_flags(&mut cflags, append);
        }
        if let Some(append) = &self.env.link_flags_append {
            push_flags(&mut ldflags, append);
        }

        SynthConfig {
            compiler: platform.compiler_executable().display().to_string(),
            include_dir: platform.include_dir().display().to_string(),
            cxxflags,
            cflags,
            ldflags,
            rdc_supplement_ldflags: info.rdc_supplement_link_flags,
            lang_fixup,
        }
    }

    fn log_paths(&self, platform: &Platform, cfg: &SynthConfig) {
        if !self.logger.enabled(VERBOSE_PATHS) {
            return;
        }
        let lines = [
            format!("SPVCC_INSTALL_PATH={}", platform.install_dir.display()),
            format!("SPVCC_CLANG_PATH={}", platform.compiler_dir.display()),
            format!("SPVCC_INCLUDE_PATH={}", cfg.include_dir),
            format!("SPVCC_CXX_FLAGS={}", cfg.cxxflags),
            format!("SPVCC_C_FLAGS={}", cfg.cflags),
            format!("SPVCC_LD_FLAGS={}", cfg.ldflags),
        ];
        for line in lines {
            self.logger.log(VERBOSE_PATHS, &line);
        }
    }
}

fn push_flags(flags: &mut String, append: &str) {
    if !flags.is_empty() {
        flags.push(' ');
    }
    flags.push_str(append);
}
