//! Argument tokenization and normalization.
//!
//! The raw argument list is flattened to a single line, cleaned up, and
//! re-split so that every later stage can classify tokens without lookahead.
//! In particular the two-token `-x <lang>` form is rewritten to the single
//! token `-x<lang>`, turning language-override detection into a plain string
//! test.

use itertools::Itertools;
use log::debug;

/// Shell control sequences that terminate the usable part of the argument
/// line. Build systems occasionally hand the driver a whole quoted command
/// line; nothing after these may leak into the downstream invocation.
const LINE_TERMINATORS: [&str; 3] = ["&&", ";", ">"];

/// Normalizes a raw argument list (program name already removed) into a clean
/// token stream.
pub fn normalize(args: &[String]) -> Vec<String> {
    let mut line = args.iter().join(" ");

    for terminator in LINE_TERMINATORS {
        if let Some(pos) = line.find(terminator) {
            line.truncate(pos);
        }
    }

    let mut tokens = Vec::new();
    let mut words = line.split_whitespace();
    while let Some(word) = words.next() {
        if word == "-x" {
            match words.next() {
                Some(lang) => tokens.push(format!("-x{}", lang)),
                // trailing bare -x: kept as-is, rejected downstream
                None => tokens.push(word.to_string()),
            }
        } else {
            tokens.push(word.to_string());
        }
    }

    debug!("normalized argument stream: {:?}", tokens);
    tokens
}
