use thiserror::Error;
use weatherlog_core::trim_trailing_commas;

/// Flag selecting "cities" mode, matched case-insensitively.
pub const CITIES_FLAG: &str = "--cities";

/// Malformed or missing command-line arguments. Reported to the operator
/// verbatim; the process exits without touching the filesystem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("No arguments provided.")]
    NoArguments,
    #[error("Invalid argument: {0}")]
    UnknownFlag(String),
    #[error("Invalid arguments provided.")]
    InvalidArguments,
}

/// Validate the argument surface and return the requested city names with
/// trailing commas trimmed.
pub fn parse_cities(args: &[String]) -> Result<Vec<String>, UsageError> {
    let Some(first) = args.first() else {
        return Err(UsageError::NoArguments);
    };

    if !first.eq_ignore_ascii_case(CITIES_FLAG) || args.len() <= 1 {
        if first.starts_with("--") {
            return Err(UsageError::UnknownFlag(first.clone()));
        }
        return Err(UsageError::InvalidArguments);
    }

    Ok(trim_trailing_commas(&args[1..]))
}
