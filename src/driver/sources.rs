//! Source-file classification.
//!
//! Assigns each remaining token to a language bucket, either under an
//! explicit `-x<lang>` sticky mode or by filename suffix, then applies the
//! default-language and link-only policies.

use log::debug;

use super::options::{InvocationOptions, Lang};
use crate::error::DriverError;

const C_SUFFIXES: [&str; 1] = [".c"];
const CXX_SUFFIXES: [&str; 3] = [".cpp", ".cxx", ".cc"];
const KERNEL_SUFFIXES: [&str; 2] = [".hip", ".cu"];
const OBJECT_SUFFIX: &str = ".o";

/// Consumes source files out of `tokens`, populating the buckets in `opts`.
///
/// Returns the residual tokens (include paths, defines, unknown flags) that
/// pass through to the synthesized command untouched, in original order.
///
/// Once a `-x<lang>` marker activates a sticky mode, every following token
/// joins that bucket regardless of its spelling; only another marker can
/// change the mode. Object files are the exception and always pass through
/// to the object bucket.
pub fn classify_sources(
    tokens: Vec<String>,
    opts: &mut InvocationOptions,
) -> Result<Vec<String>, DriverError> {
    let mut residual = Vec::with_capacity(tokens.len());
    let mut sticky: Option<Lang> = None;

    for token in tokens {
        if let Some(rest) = token.strip_prefix("-x") {
            let lang = parse_lang(rest)?;
            opts.bucket_mut(lang).set_present();
            opts.dash_x_active = true;
            sticky = Some(lang);
            continue;
        }

        if token.ends_with(OBJECT_SUFFIX) {
            opts.objects.push(token);
            continue;
        }

        if let Some(lang) = sticky {
            // sticky mode overrides suffix detection, flags included
            opts.bucket_mut(lang).push(token);
            continue;
        }

        if let Some(lang) = suffix_lang(&token) {
            opts.bucket_mut(lang).push(token);
        } else {
            residual.push(token);
        }
    }

    apply_post_pass_policy(opts);

    debug!(
        "buckets: c={:?} c++={:?} kernel={:?} objects={:?} link_only={}",
        opts.sources_c.files(),
        opts.sources_cxx.files(),
        opts.sources_kernel.files(),
        opts.objects.files(),
        opts.link_only,
    );
    Ok(residual)
}

/// Applied exactly once, after the full token list is consumed.
fn apply_post_pass_policy(opts: &mut InvocationOptions) {
    opts.link_only = opts.sources_c.is_empty()
        && opts.sources_cxx.is_empty()
        && opts.sources_kernel.is_empty();

    // Without an explicit override, C++-suffixed sources are assumed to be
    // kernel sources, the default compilation target.
    if !opts.dash_x_active {
        let mut cxx = std::mem::take(&mut opts.sources_cxx);
        cxx.drain_into(&mut opts.sources_kernel);
    }
}

fn parse_lang(name: &str) -> Result<Lang, DriverError> {
    match name {
        "c" => Ok(Lang::C),
        "c++" => Ok(Lang::Cxx),
        "hip" => Ok(Lang::Kernel),
        "" => Err(DriverError::Usage(
            "missing language after -x".to_string(),
        )),
        _ => Err(DriverError::Usage(format!(
            "-x {} is not supported",
            name
        ))),
    }
}

fn suffix_lang(token: &str) -> Option<Lang> {
    let matches = |suffixes: &[&str]| suffixes.iter().any(|s| token.ends_with(s));
    if matches(&C_SUFFIXES) {
        Some(Lang::C)
    } else if matches(&CXX_SUFFIXES) {
        Some(Lang::Cxx)
    } else if matches(&KERNEL_SUFFIXES) {
        Some(Lang::Kernel)
    } else {
        None
    }
}
