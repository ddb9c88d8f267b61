//! Configuration constants and CLI option types.
//!
//! All timeouts, limits, selector lists, and store file names live here so the
//! operational envelope of the toolbox is visible in one place.

use std::time::Duration;

use clap::ValueEnum;

// Extraction session budget
/// Ceiling on one whole scripted login interaction. Exceeding it maps to the
/// timeout sentinel; there is no retry.
pub const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(90);
/// Settle time after the initial navigation, before the login form is queried.
pub const POST_NAVIGATION_SETTLE: Duration = Duration::from_secs(2);
/// Settle time between filling the credential fields and clicking submit.
pub const PRE_SUBMIT_SETTLE: Duration = Duration::from_secs(1);
/// Settle time after clicking submit, while the post-login redirect fires the
/// authenticated API requests we want to observe.
pub const POST_SUBMIT_SETTLE: Duration = Duration::from_secs(5);
/// Grace period after the script finishes (outside the 90s budget) so late
/// request events still reach the sniffer before the capture map is read.
pub const CAPTURE_GRACE: Duration = Duration::from_secs(2);
/// Poll interval while waiting for a login form element to appear.
pub const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

// Login form selectors
/// Username-like inputs, as a `querySelector` disjunction. The placeholder
/// fragments match the account/username/mailbox labels on the target portal.
pub const USERNAME_SELECTORS: &str = "input[type=\"text\"], input[type=\"email\"], input[name=\"username\"], input[placeholder*=\"账号\"], input[placeholder*=\"用户名\"], input[placeholder*=\"邮箱\"]";
/// Password input selector.
pub const PASSWORD_SELECTOR: &str = "input[type=\"password\"]";
/// Submit-like controls, tried in order; the first one present is clicked.
pub const SUBMIT_SELECTORS: &[&str] = &[
    "button[type=\"submit\"]",
    "input[type=\"submit\"]",
    ".login-button",
];

// Header sniffing
/// Default hostname substring a request URL must contain for its headers to be
/// captured. Overridable per call; this is the portal's API host.
pub const DEFAULT_SNIFF_HOST: &str = "ankersolix-professional-ci.anker.com";

// Key (credential-bearing) header names.
// Matching is deliberately exact and case-sensitive: the portal emits exactly
// these two casings of each name. Other casings (e.g. `X-AUTH-TOKEN`) are not
// classified as key headers.
/// Session token header.
pub const HEADER_X_AUTH_TOKEN: &str = "X-Auth-Token";
/// Token timestamp header.
pub const HEADER_X_AUTH_TS: &str = "X-Auth-Ts";
/// Gateway token header.
pub const HEADER_GTOKEN: &str = "Gtoken";
/// Standard Authorization header.
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Allow-list of header names presumed to carry session/authentication
/// material. Two casings of four logical names.
pub const KEY_HEADERS: &[&str] = &[
    HEADER_X_AUTH_TOKEN,
    HEADER_X_AUTH_TS,
    HEADER_GTOKEN,
    HEADER_AUTHORIZATION,
    "x-auth-token",
    "x-auth-ts",
    "gtoken",
    "authorization",
];

// Browser launch flags, mirroring the interactive-login profile: no GPU, no
// sandbox, images skipped (the form is driven by selector, not by sight),
// JavaScript left on because the login page needs it.
pub const BROWSER_ARGS: &[&str] = &[
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--blink-settings=imagesEnabled=false",
];

// Login request validation bounds
/// Maximum accepted username/password length.
pub const MAX_CREDENTIAL_LEN: usize = 100;

// History store
/// Most-recent entries kept in the extraction history file.
pub const HISTORY_CAP: usize = 100;
/// Header values longer than this are redacted before persistence.
pub const REDACT_THRESHOLD: usize = 20;
/// Characters kept from each end of a redacted value.
pub const REDACT_KEEP: usize = 8;

// Weight tracker bounds
/// Smallest accepted weight entry in kilograms.
pub const MIN_WEIGHT_KG: f64 = 20.0;
/// Largest accepted weight entry in kilograms.
pub const MAX_WEIGHT_KG: f64 = 300.0;

// Profit calculator bounds
/// Maximum investor name length.
pub const MAX_INVESTOR_NAME_LEN: usize = 50;
/// Smallest accepted investment amount.
pub const MIN_INVESTMENT: f64 = 0.01;
/// Largest accepted investment amount.
pub const MAX_INVESTMENT: f64 = 10_000_000.0;
/// Profit records accept amounts in `-MAX_PROFIT_AMOUNT..=MAX_PROFIT_AMOUNT`
/// (a month can close at a loss).
pub const MAX_PROFIT_AMOUNT: f64 = 10_000_000.0;

// Store file names (all relative to the data directory)
/// Extraction history store.
pub const HISTORY_FILE: &str = "token_history.json";
/// Weight record store.
pub const WEIGHT_FILE: &str = "weight_records.json";
/// Profit book store.
pub const PROFIT_FILE: &str = "profit_records.json";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}
