//! Session orchestration: acquire-or-reattach, release, teardown.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::record::SessionRecord;
use super::store::SessionStore;
use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::{AutomationError, Result};

/// Bound on the reattachment probe; a dead session must not hang a new
/// invocation.
pub const REATTACH_TIMEOUT: Duration = Duration::from_secs(2);

/// Where an acquired session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Reattached to the browser recorded by an earlier invocation.
    Reattached,
    /// Launched a new browser and persisted a fresh record.
    Fresh,
}

/// Owns session lifecycle: turns the persisted record into a live browser,
/// transparently handling creation, reattachment, and staleness.
#[derive(Debug)]
pub struct SessionManager {
    store: SessionStore,
    launch: LaunchOptions,
}

impl SessionManager {
    pub fn new(store: SessionStore, launch: LaunchOptions) -> Self {
        Self { store, launch }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Returns exactly one live session: the recorded one when it still
    /// answers, otherwise a freshly created one.
    ///
    /// The store lock is held across the whole load/probe/create/persist
    /// sequence, so two overlapping first-time invocations resolve to one
    /// created browser and one reattachment.
    pub async fn acquire(&self) -> Result<ActiveSession> {
        let _guard = self.store.lock()?;

        if let Some(session) = self.attach_existing().await? {
            return Ok(session);
        }

        let browser = BrowserSession::launch(&self.launch).await?;
        let record = SessionRecord::new(
            browser.ws_endpoint().to_string(),
            browser.debug_port(),
            browser.pid().unwrap_or_default(),
            self.launch.headless,
        );
        self.store.save(&record)?;
        info!(
            target = "ec.session",
            session_id = %record.session_id,
            port = record.debug_port,
            pid = record.pid,
            "created new session"
        );

        Ok(ActiveSession {
            browser,
            record,
            source: SessionSource::Fresh,
        })
    }

    /// Reattaches to the recorded session when one is live; never creates.
    pub async fn try_attach(&self) -> Result<Option<ActiveSession>> {
        let _guard = self.store.lock()?;
        self.attach_existing().await
    }

    /// Releases an acquired session.
    ///
    /// With `keep_alive` (the default for every command except explicit
    /// teardown) the browser keeps running and the record stays in the
    /// store for the next invocation; otherwise the browser is shut down
    /// and the record removed.
    pub async fn release(&self, session: ActiveSession, keep_alive: bool) -> Result<()> {
        let ActiveSession {
            browser, mut record, ..
        } = session;

        if keep_alive {
            record.touch();
            self.store.save(&record)?;
            // Dropping the handle disconnects from the browser without
            // closing it.
            drop(browser);
            Ok(())
        } else {
            info!(target = "ec.session", session_id = %record.session_id, "shutting down session");
            browser.close().await?;
            self.store.clear()
        }
    }

    /// Caller must hold the store lock.
    async fn attach_existing(&self) -> Result<Option<ActiveSession>> {
        let record = match self.store.load() {
            Ok(Some(record)) if record.live => record,
            Ok(_) => return Ok(None),
            Err(AutomationError::StoreCorrupt(msg)) => {
                warn!(target = "ec.session", %msg, "discarding corrupt session record");
                self.store.clear()?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if !record.is_alive() {
            debug!(
                target = "ec.session",
                pid = record.pid,
                "recorded browser process is gone; recreating"
            );
            self.store.clear()?;
            return Ok(None);
        }

        match BrowserSession::connect(&record.ws_endpoint, REATTACH_TIMEOUT).await {
            Ok(browser) => {
                if record.headless != self.launch.headless {
                    debug!(
                        target = "ec.session",
                        recorded_headless = record.headless,
                        "reusing live session despite differing headless request"
                    );
                }
                let mut record = record;
                record.touch();
                self.store.save(&record)?;
                debug!(
                    target = "ec.session",
                    session_id = %record.session_id,
                    endpoint = %record.ws_endpoint,
                    "reattached to live session"
                );
                Ok(Some(ActiveSession {
                    browser,
                    record,
                    source: SessionSource::Reattached,
                }))
            }
            Err(err) => {
                debug!(
                    target = "ec.session",
                    error = %err,
                    "reattach failed; treating session as stale"
                );
                self.store.clear()?;
                Ok(None)
            }
        }
    }
}

/// A live, usable session handed to command flows.
#[derive(Debug)]
pub struct ActiveSession {
    browser: BrowserSession,
    record: SessionRecord,
    source: SessionSource,
}

impl ActiveSession {
    pub fn source(&self) -> SessionSource {
        self.source
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Reuses the session's existing page, creating one only when the
    /// browser has none; continuity requires reuse, not duplication.
    pub async fn open_or_reuse_page(&self) -> Result<chromiumoxide::Page> {
        self.browser.open_or_reuse_page().await
    }

    /// The page holding real content from an earlier `open-url`, if any.
    pub async fn active_page(&self) -> Result<Option<chromiumoxide::Page>> {
        self.browser.active_page().await
    }

    pub async fn goto(
        &self,
        page: &chromiumoxide::Page,
        url: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.browser.goto(page, url, timeout).await
    }

    pub async fn click_by_text(
        &self,
        page: &chromiumoxide::Page,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.browser.click_by_text(page, text, timeout).await
    }
}
