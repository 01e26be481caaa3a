//! [`Browser`] implementation for [`BrowserManager`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::browser::{Browser, By, Element};
use crate::cdp::{CdpError, PageSession};
use super::{BrowserError, BrowserManager};

/// Delay between implicit-wait polls.
const FIND_POLL: Duration = Duration::from_millis(250);

impl BrowserManager {
    /// Run a query against `scope` (or the document), once.
    ///
    /// A stale document root is refetched a single time; a stale scope
    /// element is reported to the caller.
    async fn query(
        &self,
        session: &PageSession,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Vec<Element>, BrowserError> {
        let selector = by.to_css();

        if let Some(scope) = scope {
            let nodes = session.query_selector_all(scope.id(), &selector).await?;
            return Ok(nodes.into_iter().map(Element::new).collect());
        }

        let root = self.document_root(session).await?;
        let nodes = match session.query_selector_all(root, &selector).await {
            Err(CdpError::StaleNode(_)) => {
                trace!("Document root {} went stale, refetching", root);
                self.invalidate_document();
                let root = self.document_root(session).await?;
                session.query_selector_all(root, &selector).await?
            }
            other => other?,
        };

        Ok(nodes.into_iter().map(Element::new).collect())
    }
}

#[async_trait]
impl Browser for BrowserManager {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let session = self.session().await?;
        self.invalidate_document();
        let result = session.navigate(url).await;
        self.invalidate_document();
        result?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        let session = self.session().await?;
        Ok(session.get_url().await?)
    }

    async fn find_element(
        &self,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Element, BrowserError> {
        let session = self.session().await?;
        let deadline = Instant::now() + self.config.implicit_wait;

        loop {
            if let Some(element) = self.query(&session, scope, by).await?.into_iter().next() {
                return Ok(element);
            }

            if Instant::now() >= deadline {
                debug!("Gave up waiting for {}", by);
                return Err(BrowserError::ElementNotFound(by.to_string()));
            }

            tokio::time::sleep(FIND_POLL).await;
        }
    }

    async fn find_elements(
        &self,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Vec<Element>, BrowserError> {
        let session = self.session().await?;
        self.query(&session, scope, by).await
    }

    async fn attribute(
        &self,
        element: Element,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        let session = self.session().await?;
        Ok(session.get_attribute(element.id(), name).await?)
    }

    async fn text(&self, element: Element) -> Result<String, BrowserError> {
        let session = self.session().await?;
        Ok(session.text_content(element.id()).await?)
    }

    async fn value(&self, element: Element) -> Result<String, BrowserError> {
        let session = self.session().await?;
        Ok(session.input_value(element.id()).await?)
    }

    async fn set_value(&self, element: Element, value: &str) -> Result<(), BrowserError> {
        let session = self.session().await?;
        session.set_node_value(element.id(), value).await?;
        Ok(())
    }

    async fn click(&self, element: Element) -> Result<(), BrowserError> {
        let session = self.session().await?;
        session.mark_document().await?;
        session.click_node(element.id()).await?;
        self.invalidate_document();
        session.settle_after_click(self.config.click_settle_timeout()).await?;
        self.invalidate_document();
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.shutdown().await
    }
}
