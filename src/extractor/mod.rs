//! Credential-driven auth-token extraction.
//!
//! One extraction session logs into a target portal with a scripted headless
//! browser, observes the outbound requests the authenticated page makes, and
//! returns the headers of requests aimed at the portal's API host, with the
//! credential-bearing ones flagged.
//!
//! Control flow is strictly linear: validate, launch, run the scripted
//! interaction under a 90-second ceiling, drain the captured headers,
//! classify, return. There are no retries; a session either succeeds or
//! reports one sentinel from [`crate::error_handling::ExtractError`].

mod browser;
mod history;
mod models;
mod sniffer;

pub use history::HistoryStore;
pub use models::{
    is_key_header, redact_header_value, ExtractResult, HeaderInfo, HistoryRecord, LoginRequest,
};

use log::{debug, info};

use crate::config::{CAPTURE_GRACE, DEFAULT_SNIFF_HOST, EXTRACTION_TIMEOUT};
use crate::error_handling::ExtractError;
use browser::BrowserSession;
use sniffer::HeaderSniffer;

/// Extraction settings that are configuration, not structure.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Hostname substring a request URL must contain to have its headers
    /// captured.
    pub sniff_host: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sniff_host: DEFAULT_SNIFF_HOST.to_string(),
        }
    }
}

/// Chrome-backed extractor. One fresh browser process per call.
#[derive(Debug, Clone, Default)]
pub struct ChromeExtractor {
    config: ExtractorConfig,
}

impl ChromeExtractor {
    /// An extractor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An extractor with explicit configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Runs one extraction session.
    ///
    /// Validation failures short-circuit before any browser resource is
    /// acquired. Afterwards the session is torn down on every path: success,
    /// script failure, or deadline. `Ok` results always have
    /// `success == true`; use [`ExtractResult::failure`] to build the
    /// displayable failure shape from the returned error.
    pub async fn extract(&self, req: &LoginRequest) -> Result<ExtractResult, ExtractError> {
        req.validate()?;

        info!("starting extraction session against {}", req.target_url);
        let session = BrowserSession::launch().await?;

        let sniffer = match HeaderSniffer::attach(session.page(), &self.config.sniff_host).await {
            Ok(sniffer) => sniffer,
            Err(e) => {
                session.close().await;
                return Err(ExtractError::Browser(e.to_string()));
            }
        };

        let script = tokio::time::timeout(EXTRACTION_TIMEOUT, session.login(req)).await;
        let outcome = match script {
            Err(_) => Err(ExtractError::Timeout),
            Ok(Err(e)) => Err(ExtractError::LoginFailed(e.to_string())),
            Ok(Ok(())) => {
                // Give late request events time to arrive before reading
                tokio::time::sleep(CAPTURE_GRACE).await;
                Ok(())
            }
        };

        let captured = sniffer.snapshot();
        sniffer.detach();
        session.close().await;

        outcome?;

        if captured.is_empty() {
            return Err(ExtractError::NoHeaders);
        }

        let result = ExtractResult::captured(captured);
        debug!(
            "captured {} headers ({} key)",
            result.headers.len(),
            result.key_headers().count()
        );
        Ok(result)
    }
}
