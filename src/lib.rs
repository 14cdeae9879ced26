//! A GPU-offload compiler driver implemented in Rust.
//!
//! Classifies a compiler command line into semantic buckets and synthesizes
//! an equivalent invocation of the underlying native compiler.

/// Contains the classification pipeline and the command synthesizer.
pub mod driver;
/// Contains the environment configuration.
pub mod env;
/// Contains the error types for the application.
pub mod error;
/// Contains the subprocess execution primitive.
pub mod exec;
/// Contains the logger.
pub mod logger;
pub mod metadata;
pub mod platform;
