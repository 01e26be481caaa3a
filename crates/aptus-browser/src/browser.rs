//! The browser automation primitive the scraper is written against.

use std::fmt;

use async_trait::async_trait;

use crate::manager::BrowserError;

/// Handle to an element on the current page.
///
/// Handles are only valid until the next navigation or click; callers must
/// look elements up again after the page changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element(i64);

impl Element {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}

/// Element locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum By<'a> {
    /// Match by `id` attribute.
    Id(&'a str),
    /// Match by CSS selector.
    Css(&'a str),
}

impl By<'_> {
    /// CSS selector equivalent of this locator.
    pub fn to_css(&self) -> String {
        match self {
            By::Id(id) => format!("#{}", id),
            By::Css(selector) => selector.to_string(),
        }
    }
}

impl fmt::Display for By<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            By::Id(id) => write!(f, "id={}", id),
            By::Css(selector) => write!(f, "css={}", selector),
        }
    }
}

/// A single browser tab driven one operation at a time.
///
/// Lookups take an optional `scope`; `None` searches the whole document.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate to an absolute URL and wait for the page to load.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// URL the browser is currently on, after any redirects.
    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Find one element, waiting up to the implicit wait for it to appear.
    ///
    /// Times out with [`BrowserError::ElementNotFound`].
    async fn find_element(
        &self,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Element, BrowserError>;

    /// Find all elements currently matching, in document order. Does not wait.
    async fn find_elements(
        &self,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Vec<Element>, BrowserError>;

    /// Read an attribute; `None` when the element has no such attribute.
    async fn attribute(&self, element: Element, name: &str)
        -> Result<Option<String>, BrowserError>;

    /// Text content of an element, with character references decoded.
    async fn text(&self, element: Element) -> Result<String, BrowserError>;

    /// Current value of a form control.
    async fn value(&self, element: Element) -> Result<String, BrowserError>;

    /// Replace the value of a form control as if typed by the user.
    async fn set_value(&self, element: Element, value: &str) -> Result<(), BrowserError>;

    /// Click an element and wait for any navigation it triggers.
    ///
    /// A click that has not started a navigation within the implicit wait is
    /// taken as one that stays on the page.
    async fn click(&self, element: Element) -> Result<(), BrowserError>;

    /// End the session.
    async fn close(&self) -> Result<(), BrowserError>;
}
