//! BrowserManager core: struct definition, connect, chrome management.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

use crate::cdp::{CdpClient, PageSession};
use super::{BrowserError, BrowserManagerConfig};

/// Launch polling: 30 tries, 200ms apart.
const LAUNCH_ATTEMPTS: u32 = 30;
const LAUNCH_POLL: Duration = Duration::from_millis(200);

/// Drives a single Chrome tab.
pub struct BrowserManager {
    pub(super) config: BrowserManagerConfig,
    pub(super) client: RwLock<Option<Arc<CdpClient>>>,
    pub(super) page: RwLock<Option<Arc<PageSession>>>,
    /// Node id of the current document root; reset whenever the page changes.
    pub(super) document: parking_lot::Mutex<Option<i64>>,
    /// Chrome process handle (if we launched it).
    pub(super) chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    /// Create a new browser manager. Nothing is launched until [`connect`].
    ///
    /// [`connect`]: Self::connect
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            page: RwLock::new(None),
            document: parking_lot::Mutex::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    /// Manager configuration.
    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Check if Chrome is already running on the debug port.
    pub(super) async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    /// Launch Chrome with remote debugging enabled.
    pub(super) async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--metrics-recording-only")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary, and open the page.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.page.read().await.is_some() {
            return Ok(());
        }

        if !self.is_chrome_running().await {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut started = false;
            for _ in 0..LAUNCH_ATTEMPTS {
                tokio::time::sleep(LAUNCH_POLL).await;
                if self.is_chrome_running().await {
                    started = true;
                    break;
                }
            }

            if !started {
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        let session = client.new_page(None).await?;
        debug!("Attached to page {}", session.target_id());

        *self.client.write().await = Some(Arc::new(client));
        *self.page.write().await = Some(Arc::new(session));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    /// The attached page session.
    pub(super) async fn session(&self) -> Result<Arc<PageSession>, BrowserError> {
        self.page
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Forget the cached document root.
    pub(super) fn invalidate_document(&self) {
        self.document.lock().take();
    }

    /// Node id of the document root, fetched once per page load.
    pub(super) async fn document_root(&self, session: &PageSession) -> Result<i64, BrowserError> {
        if let Some(root) = *self.document.lock() {
            return Ok(root);
        }
        let root = session.get_document().await?;
        trace!("Fetched {} as node {}", root.node_name, root.node_id);
        *self.document.lock() = Some(root.node_id);
        Ok(root.node_id)
    }

    /// Close the page and drop the connection. Chrome keeps running.
    pub async fn disconnect(&self) -> Result<(), BrowserError> {
        self.invalidate_document();
        let page = self.page.write().await.take();
        let client = self.client.write().await.take();

        if let (Some(page), Some(client)) = (page, client) {
            if let Err(e) = client.close_page(page.target_id()).await {
                debug!("Closing page failed: {}", e);
            }
        }

        info!("Browser connection closed");
        Ok(())
    }

    /// Disconnect and shut down Chrome if we launched it.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        self.disconnect().await?;
        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
        Ok(())
    }
}
