use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use chromiumoxide::{Browser, Page};
use futures::StreamExt as _;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use super::js;
use crate::error::{AutomationError, Result};

/// Bound on detached launch: spawn plus DevTools endpoint discovery.
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Poll interval for endpoint discovery and element waits.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chrome/Chromium executables probed on PATH, in order.
const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// How the session browser is launched.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Profile directory (`--user-data-dir`), kept apart from the user's
    /// regular browser profile.
    pub profile_dir: PathBuf,
    /// Explicit browser executable; PATH candidates are probed when unset.
    pub executable: Option<PathBuf>,
}

/// Handle to the live session browser.
///
/// Always connected over the DevTools WebSocket, never a managed child:
/// dropping the handle disconnects and leaves the browser running, which is
/// what keeps the session alive between invocations. [`BrowserSession::close`]
/// is the only way the browser goes away.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    ws_endpoint: String,
    debug_port: u16,
    pid: Option<u32>,
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("ws_endpoint", &self.ws_endpoint)
            .field("debug_port", &self.debug_port)
            .field("pid", &self.pid)
            .finish()
    }
}

impl BrowserSession {
    /// Spawns a detached browser and connects to it.
    ///
    /// The record for reattachment is the WebSocket endpoint published on
    /// the DevTools HTTP port; discovery is bounded so a browser that never
    /// comes up fails the invocation instead of hanging it.
    pub async fn launch(options: &LaunchOptions) -> Result<Self> {
        let executable = match &options.executable {
            Some(path) => path.clone(),
            None => find_executable()?,
        };
        let port = pick_free_port()?;
        std::fs::create_dir_all(&options.profile_dir)?;

        let mut cmd = Command::new(&executable);
        cmd.arg(format!("--remote-debugging-port={port}"))
            .arg(format!("--user-data-dir={}", options.profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if options.headless {
            cmd.arg("--headless=new");
        }
        cmd.arg("about:blank");

        let child = cmd.spawn().map_err(|err| {
            AutomationError::BrowserLaunch(format!(
                "failed to spawn {}: {err}",
                executable.display()
            ))
        })?;
        let pid = child.id();
        // Not waited on: the browser must outlive this invocation.
        drop(child);

        info!(
            target = "ec.browser",
            executable = %executable.display(),
            port,
            pid,
            headless = options.headless,
            "spawned session browser"
        );

        let ws_endpoint = discover_ws_endpoint(port, LAUNCH_TIMEOUT).await?;
        let (browser, handler_task) = connect_inner(&ws_endpoint).await?;

        Ok(Self {
            browser,
            handler_task,
            ws_endpoint,
            debug_port: port,
            pid: Some(pid),
        })
    }

    /// Reattaches to a recorded browser, bounded by `probe_timeout`.
    ///
    /// Any failure (refused, unreachable, timed out) comes back as
    /// [`AutomationError::StaleSession`]; the session layer recovers by
    /// recreating.
    pub async fn connect(ws_endpoint: &str, probe_timeout: Duration) -> Result<Self> {
        let connect = connect_inner(ws_endpoint);
        let (browser, handler_task) = tokio::time::timeout(probe_timeout, connect)
            .await
            .map_err(|_| {
                AutomationError::StaleSession(format!(
                    "no answer from {ws_endpoint} within {}ms",
                    probe_timeout.as_millis()
                ))
            })?
            .map_err(|err| AutomationError::StaleSession(err.to_string()))?;

        Ok(Self {
            browser,
            handler_task,
            ws_endpoint: ws_endpoint.to_string(),
            debug_port: port_from_ws(ws_endpoint).unwrap_or_default(),
            pid: None,
        })
    }

    pub fn ws_endpoint(&self) -> &str {
        &self.ws_endpoint
    }

    pub fn debug_port(&self) -> u16 {
        self.debug_port
    }

    /// PID of the spawned browser; unknown on reattach.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// First page holding real content, in target order.
    ///
    /// The initial `about:blank` tab and browser-internal pages do not
    /// count: their presence does not mean `open-url` ever ran.
    pub async fn active_page(&self) -> Result<Option<Page>> {
        for page in self.browser.pages().await? {
            let url = page.url().await?;
            if is_content_url(url.as_deref()) {
                return Ok(Some(page));
            }
        }
        Ok(None)
    }

    /// Reuses the session's page, creating one only when none exists.
    pub async fn open_or_reuse_page(&self) -> Result<Page> {
        if let Some(page) = self.active_page().await? {
            trace!(target = "ec.browser", "reusing active page");
            return Ok(page);
        }
        if let Some(page) = self.browser.pages().await?.into_iter().next() {
            trace!(target = "ec.browser", "reusing blank page");
            return Ok(page);
        }
        debug!(target = "ec.browser", "no page in session; opening one");
        Ok(self.browser.new_page("about:blank").await?)
    }

    /// Navigates `page` and waits for the load to settle, bounded.
    pub async fn goto(&self, page: &Page, url: &str, timeout: Duration) -> Result<()> {
        let nav = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };
        match tokio::time::timeout(timeout, nav).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(AutomationError::Navigation {
                url: url.to_string(),
                source: anyhow::Error::new(err),
            }),
            Err(_) => Err(AutomationError::Timeout {
                ms: timeout.as_millis() as u64,
                operation: format!("navigation to {url}"),
            }),
        }
    }

    /// Clicks the first visible element whose text matches, polling until
    /// `timeout` for content that renders late.
    pub async fn click_by_text(&self, page: &Page, text: &str, timeout: Duration) -> Result<()> {
        let expr = js::click_visible_text_expr(text);
        let deadline = Instant::now() + timeout;
        loop {
            let clicked = page
                .evaluate(expr.clone())
                .await?
                .into_value::<bool>()
                .unwrap_or(false);
            if clicked {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AutomationError::ElementNotFound {
                    text: text.to_string(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Shuts the browser down; used only by explicit teardown.
    pub async fn close(self) -> Result<()> {
        let Self {
            mut browser,
            handler_task,
            ..
        } = self;
        browser.close().await?;
        handler_task.abort();
        Ok(())
    }
}

async fn connect_inner(ws_endpoint: &str) -> std::result::Result<(Browser, JoinHandle<()>), chromiumoxide::error::CdpError> {
    let (browser, mut handler) = Browser::connect(ws_endpoint.to_string()).await?;
    let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });
    Ok((browser, handler_task))
}

/// Polls the DevTools HTTP endpoint until it publishes its WebSocket URL.
async fn discover_ws_endpoint(port: u16, timeout: Duration) -> Result<String> {
    let url = format!("http://127.0.0.1:{port}/json/version");
    let client = reqwest::Client::new();
    let deadline = Instant::now() + timeout;
    loop {
        match client.get(&url).send().await {
            Ok(resp) => {
                if let Ok(value) = resp.json::<serde_json::Value>().await {
                    if let Some(ws) = value.get("webSocketDebuggerUrl").and_then(|v| v.as_str()) {
                        return Ok(ws.to_string());
                    }
                }
            }
            Err(err) => {
                trace!(target = "ec.browser", error = %err, "devtools endpoint not up yet");
            }
        }
        if Instant::now() >= deadline {
            return Err(AutomationError::BrowserLaunch(format!(
                "devtools endpoint on port {port} did not come up within {}ms",
                timeout.as_millis()
            )));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

fn find_executable() -> Result<PathBuf> {
    CHROME_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| {
            AutomationError::BrowserLaunch(
                "no Chrome or Chromium executable found on PATH".to_string(),
            )
        })
}

fn pick_free_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

/// Whether a page URL counts as session content (vs. the blank tab the
/// browser starts with or its internal pages).
fn is_content_url(url: Option<&str>) -> bool {
    match url {
        None | Some("") | Some("about:blank") => false,
        Some(url) => !url.starts_with("chrome://") && !url.starts_with("devtools://"),
    }
}

fn port_from_ws(ws_endpoint: &str) -> Option<u16> {
    let rest = ws_endpoint.strip_prefix("ws://")?;
    let authority = rest.split('/').next()?;
    authority.rsplit(':').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_url_classification() {
        assert!(!is_content_url(None));
        assert!(!is_content_url(Some("")));
        assert!(!is_content_url(Some("about:blank")));
        assert!(!is_content_url(Some("chrome://newtab/")));
        assert!(!is_content_url(Some("devtools://devtools/bundled/")));
        assert!(is_content_url(Some("https://example.com/")));
        assert!(is_content_url(Some("data:text/html,<h1>hi</h1>")));
        assert!(is_content_url(Some("file:///tmp/page.html")));
    }

    #[test]
    fn port_parses_from_ws_endpoint() {
        assert_eq!(
            port_from_ws("ws://127.0.0.1:9222/devtools/browser/abc-def"),
            Some(9222)
        );
        assert_eq!(port_from_ws("http://127.0.0.1:9222/"), None);
        assert_eq!(port_from_ws("ws://localhost:notaport/x"), None);
    }

    #[test]
    fn free_ports_are_distinct_from_zero() {
        let port = pick_free_port().unwrap();
        assert_ne!(port, 0);
    }
}
