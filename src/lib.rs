//! toolbox library: the cores of a personal desktop toolbox.
//!
//! Three unrelated utilities share this crate, each a small core over one
//! pretty-printed JSON document:
//!
//! - [`extractor`] — logs into a target portal with a scripted headless
//!   browser, sniffs the outbound requests for authentication headers, and
//!   keeps a redacted history of past sessions;
//! - [`weight`] — a chained weight-record list with change tracking and
//!   aggregate statistics;
//! - [`profit`] — investors and monthly profit records with proportional
//!   distribution.
//!
//! # Example
//!
//! ```no_run
//! use toolbox::error_handling::ExtractError;
//! use toolbox::extractor::{ChromeExtractor, LoginRequest};
//!
//! # async fn example() -> Result<(), ExtractError> {
//! let extractor = ChromeExtractor::new();
//! let req = LoginRequest {
//!     username: "user@example.com".into(),
//!     password: "secret".into(),
//!     target_url: "https://portal.example.com/login".into(),
//! };
//! let result = extractor.extract(&req).await?;
//! for header in result.key_headers() {
//!     println!("{}: {}", header.name, header.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The extractor needs a Tokio runtime and a local Chrome/Chromium install;
//! the weight and profit cores are synchronous.

pub mod config;
pub mod error_handling;
pub mod extractor;
pub mod initialization;
pub mod profit;
pub mod storage;
pub mod weight;

pub use error_handling::{ExtractError, LedgerError, StorageError, ValidationError, WeightError};
pub use extractor::{ChromeExtractor, ExtractResult, ExtractorConfig, LoginRequest};
