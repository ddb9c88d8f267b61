//! Outbound-request header capture.
//!
//! A background task subscribes to `Network.requestWillBeSent` events for the
//! session's page and copies the string-valued headers of every request whose
//! URL contains the sniff-host substring into a shared map. The map is read
//! once, after the scripted interaction and its grace period.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chromiumoxide::cdp::browser_protocol::network::EventRequestWillBeSent;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::trace;
use tokio::task::JoinHandle;

/// Collects headers of matching outbound requests while the login script runs.
///
/// The listener task and the post-script reader contend on a plain mutex;
/// critical sections only copy map entries and never cross an await point.
/// Multiple matching requests merge into one map, later values overwriting
/// earlier ones per name; insertion order carries no meaning.
pub struct HeaderSniffer {
    captured: Arc<Mutex<HashMap<String, String>>>,
    listener: JoinHandle<()>,
}

impl HeaderSniffer {
    /// Subscribes to the page's request events and starts capturing headers of
    /// requests whose URL contains `sniff_host`.
    pub async fn attach(page: &Page, sniff_host: &str) -> Result<Self, CdpError> {
        let mut events = page.event_listener::<EventRequestWillBeSent>().await?;

        let captured = Arc::new(Mutex::new(HashMap::new()));
        let sink = Arc::clone(&captured);
        let sniff_host = sniff_host.to_string();

        let listener = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if !event.request.url.contains(&sniff_host) {
                    continue;
                }
                trace!("capturing headers of request to {}", event.request.url);

                let Some(headers) = event.request.headers.inner().as_object() else {
                    continue;
                };

                let mut captured = lock_unpoisoned(&sink);
                for (name, value) in headers {
                    if let Some(value) = value.as_str() {
                        captured.insert(name.clone(), value.to_string());
                    }
                }
            }
        });

        Ok(Self { captured, listener })
    }

    /// Reads the capture map. Everything captured before this call is visible.
    pub fn snapshot(&self) -> HashMap<String, String> {
        lock_unpoisoned(&self.captured).clone()
    }

    /// Stops the listener task.
    pub fn detach(self) {
        self.listener.abort();
    }
}

impl Drop for HeaderSniffer {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// The listener holds the lock only while copying plain strings, so a poisoned
/// mutex still guards coherent data; recover the guard instead of propagating.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
