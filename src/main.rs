use std::process::exit;

use spvcc::driver::Driver;
use spvcc::env::EnvVariables;
use spvcc::error::FATAL_EXIT_CODE;

/// The main entry point for the application.
///
/// Classifies the command line, synthesizes the backend compiler invocation,
/// runs it, and exits with the child's exit code.
fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let driver = Driver::new(EnvVariables::from_process());

    match driver.run(&argv) {
        Ok(code) => exit(code),
        Err(e) => {
            // fatal diagnostics go to stdout, like the rest of the driver's
            // user-facing output
            println!("error: {}", e);
            exit(FATAL_EXIT_CODE);
        }
    }
}
