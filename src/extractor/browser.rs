//! Headless browser session management and the scripted login interaction.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::EnableParams;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::config::{
    BROWSER_ARGS, ELEMENT_POLL_INTERVAL, PASSWORD_SELECTOR, POST_NAVIGATION_SETTLE,
    POST_SUBMIT_SETTLE, PRE_SUBMIT_SETTLE, SUBMIT_SELECTORS, USERNAME_SELECTORS,
};
use crate::error_handling::ExtractError;
use crate::extractor::models::LoginRequest;

/// One headless Chrome process with a single page, scoped to one extraction
/// call.
///
/// The CDP message pump runs on its own task for the lifetime of the session.
/// `close` tears the process down; if the session is dropped instead (caller
/// cancellation), the pump task is aborted and the child process is killed by
/// the browser handle's own drop.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches a fresh isolated headless browser and opens a blank page.
    pub async fn launch() -> Result<Self, ExtractError> {
        let mut builder = BrowserConfig::builder();
        for arg in BROWSER_ARGS {
            builder = builder.arg(*arg);
        }
        let config = builder.build().map_err(ExtractError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ExtractError::Browser(e.to_string()))?;

        // Drive the CDP websocket until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(message) = handler.next().await {
                if let Err(e) = message {
                    debug!("CDP handler event error: {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(ExtractError::Browser(e.to_string()));
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// The session's single page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Runs the scripted login interaction, strictly sequential:
    /// enable network capture, navigate, settle, fill the credential fields,
    /// submit, settle again. Element readiness is a polled condition; the
    /// settles are bounded sleeps because the portal exposes no completion
    /// signal for them.
    pub async fn login(&self, req: &LoginRequest) -> Result<(), CdpError> {
        self.page.execute(EnableParams::default()).await?;

        self.page.goto(req.target_url.as_str()).await?;
        tokio::time::sleep(POST_NAVIGATION_SETTLE).await;

        let username_input = self.wait_for_element(USERNAME_SELECTORS).await;
        username_input.focus().await?;
        username_input.type_str(&req.username).await?;

        let password_input = self.page.find_element(PASSWORD_SELECTOR).await?;
        password_input.focus().await?;
        password_input.type_str(&req.password).await?;

        tokio::time::sleep(PRE_SUBMIT_SETTLE).await;

        let submit = self.find_first(SUBMIT_SELECTORS).await;
        submit.click().await?;

        // Let the post-login redirect fire the authenticated requests
        tokio::time::sleep(POST_SUBMIT_SETTLE).await;

        Ok(())
    }

    /// Polls until `selector` matches an element. Unbounded on its own; the
    /// caller's overall deadline cancels the wait.
    async fn wait_for_element(&self, selector: &str) -> Element {
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return element;
            }
            tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    /// Polls a selector disjunction until one of them matches, returning the
    /// first present element.
    async fn find_first(&self, selectors: &[&str]) -> Element {
        loop {
            for selector in selectors {
                if let Ok(element) = self.page.find_element(*selector).await {
                    return element;
                }
            }
            tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    /// Tears the session down: closes the browser, reaps the child process,
    /// and stops the message pump. Failures are logged, not propagated; there
    /// is nothing a caller could do with them.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            debug!("browser wait failed: {e}");
        }
        self.handler_task.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Normal teardown goes through close(); this covers the cancellation
        // path where the extract future is dropped mid-flight.
        self.handler_task.abort();
    }
}
