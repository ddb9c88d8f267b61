//! Error types used throughout the application.
//!
//! The extraction sentinels are distinguishable by variant identity, never by
//! string matching. Validation errors are descriptive and deliberately kept
//! outside the sentinel taxonomy; they flow through `ExtractError::Validation`
//! so a single `Result` covers both.

use log::SetLoggerError;
use thiserror::Error;

use crate::config::{MAX_CREDENTIAL_LEN, MAX_INVESTOR_NAME_LEN};

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    Logger(#[from] SetLoggerError),
}

/// Login request validation failures.
///
/// Plain descriptive errors; checked before any browser resource is acquired.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username must not exceed {MAX_CREDENTIAL_LEN} characters")]
    UsernameTooLong,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("password must not exceed {MAX_CREDENTIAL_LEN} characters")]
    PasswordTooLong,

    #[error("target URL must not be empty")]
    EmptyTargetUrl,

    #[error("target URL is not a valid URL")]
    MalformedTargetUrl,

    #[error("only https target URLs are supported")]
    SchemeNotHttps,
}

/// Extraction failure taxonomy.
///
/// One variant per failure condition of an extraction session. `LoginFailed`
/// is the catch-all for script failures that match nothing more specific.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The target rejected the supplied credentials.
    ///
    /// Reserved: the scripted flow cannot currently tell a rejected login from
    /// any other script failure, so nothing maps here yet.
    #[error("the target site rejected the login credentials")]
    InvalidCredentials,

    /// The scripted login interaction failed.
    #[error("login flow failed: {0}")]
    LoginFailed(String),

    /// A network-level failure outside the scripted steps.
    ///
    /// Reserved: connection failures currently surface through the script and
    /// map to `LoginFailed`.
    #[error("network error during extraction")]
    Network,

    /// The browser process could not be launched or the session could not be
    /// set up.
    #[error("browser session error: {0}")]
    Browser(String),

    /// The 90-second interaction ceiling elapsed.
    #[error("extraction timed out")]
    Timeout,

    /// The script completed but no matching request was observed.
    #[error("no request headers were captured")]
    NoHeaders,

    /// The login request failed validation; nothing was attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error types for JSON store operations.
///
/// Propagated unwrapped to the caller, which owns user-visible presentation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the store file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file held something other than the expected JSON shape.
    #[error("storage parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Weight entry validation failures.
#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("weight must be greater than 0")]
    NotPositive,

    #[error("weight must be between {min} and {max} kg")]
    OutOfRange { min: f64, max: f64 },
}

/// Profit ledger validation failures.
#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("investor name must not be empty")]
    EmptyName,

    #[error("investor name must not exceed {MAX_INVESTOR_NAME_LEN} characters")]
    NameTooLong,

    #[error("an investor with this name already exists")]
    DuplicateName,

    #[error("investment amount must be between {min} and {max}")]
    InvestmentOutOfRange { min: f64, max: f64 },

    #[error("profit amount must be between {min} and {max}")]
    ProfitOutOfRange { min: f64, max: f64 },

    #[error("profit date must not be in the future")]
    FutureDate,

    #[error("at least one investor is required before recording profit")]
    NoInvestors,

    #[error("no investor with id {0}")]
    UnknownInvestor(String),

    #[error("no profit record with id {0}")]
    UnknownRecord(String),
}
