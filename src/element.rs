use chromiumoxide::element::Element as CdpElement;

use crate::error::{Error, Result};

/// Wrapper around a CDP element, narrowed to the operations filling needs.
pub struct Element {
    inner: CdpElement,
}

impl Element {
    pub(crate) fn new(inner: CdpElement) -> Self {
        Self { inner }
    }

    /// Returns a reference to the underlying CDP element.
    pub fn inner(&self) -> &CdpElement {
        &self.inner
    }

    /// Click this element (scrolls into view first).
    pub async fn click(&self) -> Result<()> {
        self.inner.click().await.map_err(Error::CdpError)?;
        Ok(())
    }

    /// Type text into this element with real key events, so the portal's
    /// input listeners fire as they would for a human operator.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.type_str(text).await.map_err(Error::CdpError)?;
        Ok(())
    }

    /// Get the value of an attribute on this element.
    pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        self.inner.attribute(name).await.map_err(Error::CdpError)
    }
}
