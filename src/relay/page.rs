//! Server response handling
//!
//! The finish endpoints answer a completed flow with either an HTTP
//! redirect to a freshly rendered page or an HTML fragment to display.
//! Anything else (JSON error bodies included) produces no page action.

use url::Url;

use crate::errors::RelayError;

/// What the page should do with a finish-endpoint response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Navigate to the response's final URL
    Navigate(Url),
    /// Replace the document content with the response body
    ReplaceDocument(String),
    /// Leave the page alone
    None,
}

/// Page boundary driven by [`PageAction::apply`]
///
/// In a browser this is the DOM; headless consumers can record the actions
/// or ignore them and match on the returned [`PageAction`] directly.
pub trait Page {
    fn navigate(&mut self, url: &Url);
    fn replace_document(&mut self, html: &str);
}

impl PageAction {
    /// Derive the page action from a finish-endpoint response
    ///
    /// Redirects win over HTML bodies. The HTTP client follows redirects
    /// transparently, so a redirect is detected by comparing the response's
    /// final URL against the URL the request was sent to. HTML is rendered
    /// regardless of status, matching how servers report flow failures as
    /// re-rendered forms.
    pub(crate) async fn from_response(
        request_url: &Url,
        response: reqwest::Response,
    ) -> Result<Self, RelayError> {
        let redirected = response.url() != request_url;

        if response.status().is_success() && redirected {
            return Ok(PageAction::Navigate(response.url().clone()));
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("text/html"));

        if is_html {
            let html = response.text().await?;
            return Ok(PageAction::ReplaceDocument(html));
        }

        Ok(PageAction::None)
    }

    /// Apply this action to a page
    pub fn apply(&self, page: &mut dyn Page) {
        match self {
            PageAction::Navigate(url) => page.navigate(url),
            PageAction::ReplaceDocument(html) => page.replace_document(html),
            PageAction::None => {}
        }
    }
}
