//! Flag classification.
//!
//! A single forward pass over the normalized token stream that extracts the
//! options the driver itself understands. Everything unrecognized stays in
//! the residual list, in its original position, for opaque passthrough.

use log::debug;

use super::options::InvocationOptions;

/// Two-token flags whose value arrives as the following token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Output,
    DepTarget,
    DepFile,
}

impl Pending {
    fn spelling(self) -> &'static str {
        match self {
            Pending::Output => "-o",
            Pending::DepTarget => "-MT",
            Pending::DepFile => "-MF",
        }
    }
}

/// Consumes recognized flags out of `tokens`, populating `opts`.
///
/// Returns the residual tokens with consumed ones removed and the original
/// order otherwise preserved. A two-token flag at the very end of the input
/// is left present with no captured value rather than failing.
pub fn classify_flags(tokens: Vec<String>, opts: &mut InvocationOptions) -> Vec<String> {
    let mut residual = Vec::with_capacity(tokens.len());
    let mut pending: Option<Pending> = None;

    for token in tokens {
        if let Some(flag) = pending.take() {
            let value = format!("{} {}", flag.spelling(), token);
            match flag {
                Pending::Output => opts.output.capture(value),
                Pending::DepTarget => opts.dep_target.capture(value),
                Pending::DepFile => opts.dep_file.capture(value),
            }
            continue;
        }

        match token.as_str() {
            // kept in the residual list: the backend needs it in place
            "-c" => {
                opts.compile_only.set();
                residual.push(token);
            }
            // dropped: the synthesizer re-adds the marker from the
            // authoritative toolchain configuration
            "--offload=spirv64" => opts.offload.set(),
            "-fgpu-rdc" => {
                opts.rdc.set();
                residual.push(token);
            }
            "--short-version" => {
                opts.print_version.set();
                opts.run_cmd = false;
            }
            "--cxxflags" => {
                opts.print_cxxflags.set();
                opts.run_cmd = false;
            }
            "--ldflags" => {
                opts.print_ldflags.set();
                opts.run_cmd = false;
            }
            "-o" => {
                opts.output.set();
                pending = Some(Pending::Output);
            }
            "-MT" => {
                opts.dep_target.set();
                pending = Some(Pending::DepTarget);
            }
            "-MF" => {
                opts.dep_file.set();
                pending = Some(Pending::DepFile);
            }
            _ => residual.push(token),
        }
    }

    debug!("residual tokens after flag classification: {:?}", residual);
    residual
}
