//! Authenticated page navigation.
//!
//! The portal bounces any request from an unauthenticated session to its
//! login page. [`Navigator::open`] hides that: it logs in when bounced and
//! then repeats the original request.

use aptus_browser::{Browser, BrowserError, By, Element};
use aptus_config::AptusConfig;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, ScrapeError};

/// Path of the portal login page.
pub const LOGIN_PATH: &str = "Account/Login";

/// Whether the portal currently accepts the browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not logged in, or the portal dropped the session.
    Anonymous,
    /// The last page load did not end on the login page.
    Authenticated,
}

/// Owns the browser and the portal session.
pub struct Navigator<B> {
    browser: B,
    base_url: String,
    username: String,
    password: String,
    state: SessionState,
    logins: u32,
}

impl<B: Browser> Navigator<B> {
    pub fn new(browser: B, config: &AptusConfig) -> Self {
        Self {
            browser,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            state: SessionState::Anonymous,
            logins: 0,
        }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of successful logins so far.
    pub fn logins(&self) -> u32 {
        self.logins
    }

    /// Absolute URL of a portal path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn is_login_page(&self, url: &str) -> bool {
        url.starts_with(&self.url_for(LOGIN_PATH))
    }

    /// Open a portal path, logging in if the portal asks for it, and return
    /// the URL the browser ended up on.
    ///
    /// Logs in at most once per call; credentials that do not get past the
    /// login page fail with [`ScrapeError::LoginFailed`].
    pub async fn open(&mut self, path: &str) -> Result<String> {
        let target = self.url_for(path);
        debug!("Opening {}", target);

        self.browser.navigate(&target).await?;
        let current = self.browser.current_url().await?;

        if !self.is_login_page(&current) {
            self.state = SessionState::Authenticated;
            return Ok(current);
        }

        info!("Redirected to login page");
        self.state = SessionState::Anonymous;
        self.login().await?;

        // Some pages do not send the user back after login; ask again.
        self.browser.navigate(&target).await?;
        let current = self.browser.current_url().await?;
        Ok(current)
    }

    async fn login(&mut self) -> Result<()> {
        let username = self.login_element("Username").await?;
        self.browser.set_value(username, &self.username).await?;

        let password = self.login_element("Password").await?;
        self.browser.set_value(password, &self.password).await?;

        let button = self.login_element("btnLogin").await?;
        self.browser.click(button).await?;

        let current = self.browser.current_url().await?;
        if self.is_login_page(&current) {
            return Err(ScrapeError::LoginFailed);
        }

        self.state = SessionState::Authenticated;
        self.logins += 1;
        info!("Logged in");
        Ok(())
    }

    async fn login_element(&self, id: &str) -> Result<Element> {
        match self.browser.find_element(None, By::Id(id)).await {
            Ok(element) => Ok(element),
            Err(BrowserError::ElementNotFound(_)) => {
                Err(ScrapeError::LoginElementMissing(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// End the browser session.
    pub async fn close(&self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

/// Whether `final_url` is the page at `path`, i.e. the request was not
/// redirected elsewhere. Query string and fragment are ignored.
pub fn landed_on(final_url: &str, path: &str) -> bool {
    let actual = match Url::parse(final_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => final_url.to_string(),
    };
    let actual = actual.trim_end_matches('/');
    let wanted = path.trim_matches('/');

    actual == wanted || actual.ends_with(&format!("/{}", wanted))
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod tests;
