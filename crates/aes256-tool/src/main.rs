//! `aes256` command-line entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Config`] from `AES256_*` environment variables.
//! 3. Initialise structured logging on stderr.
//! 4. Run the command, printing its output line on stdout.
//!
//! On failure a JSON [`ErrorReport`] goes to stderr and the process exits
//! with the code of the first library error found in the error chain.

mod cli;
mod commands;
mod config;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use common::protocol::ErrorReport;
use common::{CipherError, Error, MaterialError};
use tracing::error;

use cli::Cli;
use config::Config;

/// `EX_SOFTWARE`, for failures with no library error in the chain.
const EXIT_INTERNAL: u8 = 70;

/// `EX_CONFIG`, for an invalid environment.
const EXIT_CONFIG: u8 = 78;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Logging is not yet up; write to stderr directly.
            eprintln!("ERROR: configuration invalid: {e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level, cfg.log_json) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::from(EXIT_INTERNAL);
    }

    // -----------------------------------------------------------------------
    // 3. Command
    // -----------------------------------------------------------------------
    match commands::run(cli.command, &cfg) {
        Ok(line) => {
            if !line.is_empty() {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let (code, exit) = classify(&e);
            error!(code, "command failed");
            let report = ErrorReport::new(code, format!("{e:#}"));
            match serde_json::to_string(&report) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("ERROR: {e:#}"),
            }
            ExitCode::from(exit)
        }
    }
}

/// Report code and exit status for the first library error in the chain.
fn classify(err: &anyhow::Error) -> (&'static str, u8) {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<Error>() {
            return (e.code(), exit_status(e.exit_code()));
        }
        if let Some(e) = cause.downcast_ref::<MaterialError>() {
            return (e.code(), exit_status(e.exit_code()));
        }
        if let Some(e) = cause.downcast_ref::<CipherError>() {
            return (e.code(), exit_status(e.exit_code()));
        }
    }
    ("internal_error", EXIT_INTERNAL)
}

fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(EXIT_INTERNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn classify_finds_wrapped_library_error() {
        let err = Err::<(), _>(Error::from(CipherError::AuthenticationFailure))
            .context("failed to open envelope")
            .unwrap_err();
        assert_eq!(classify(&err), ("auth_failed", 77));
    }

    #[test]
    fn classify_finds_bare_material_error() {
        let err = anyhow::Error::new(MaterialError::SizeMismatch {
            role: common::Role::Key,
            len: 3,
        })
        .context("loading");
        assert_eq!(classify(&err), ("size_mismatch", 65));
    }

    #[test]
    fn classify_defaults_to_internal() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(classify(&err), ("internal_error", 70));
    }
}
