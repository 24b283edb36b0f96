use std::time::Duration;

use chromiumoxide::page::Page as CdpPage;

use crate::element::Element;
use crate::error::{Error, Result};

/// A form control discovered on the portal page. Logged in verbose mode so
/// the operator can see what the page exposes before values are written.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FormField {
    pub tag: String,
    pub r#type: String,
    pub name: String,
    pub id: String,
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

/// Wrapper around a CDP page, narrowed to what form filling needs.
pub struct Page {
    inner: CdpPage,
    element_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CdpPage, element_timeout: Duration) -> Self {
        Self {
            inner,
            element_timeout,
        }
    }

    /// Returns a reference to the underlying CDP page.
    pub fn inner(&self) -> &CdpPage {
        &self.inner
    }

    /// Get the current page title.
    pub async fn title(&self) -> Result<String> {
        let result = self
            .inner
            .evaluate("document.title")
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        match result.into_value::<String>() {
            Ok(title) => Ok(title),
            Err(_) => Ok(String::new()),
        }
    }

    // ── Element lookup ──────────────────────────────────────────────

    /// Find an element matching the given CSS selector.
    pub async fn find_element(&self, selector: &str) -> Result<Element> {
        let el = self
            .inner
            .find_element(selector)
            .await
            .map_err(|e| Error::FieldNotFound(format!("{selector}: {e}")))?;
        Ok(Element::new(el))
    }

    /// Wait for an element matching the given CSS selector to appear.
    /// Polls every 100ms up to the configured element timeout; portal pages
    /// render their controls at unpredictable times.
    pub async fn wait_for_selector(&self, selector: &str) -> Result<Element> {
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            match self.find_element(selector).await {
                Ok(el) => return Ok(el),
                Err(_) if start.elapsed() < self.element_timeout => {
                    tokio::time::sleep(interval).await;
                }
                Err(_) => return Err(Error::FieldNotFound(selector.to_string())),
            }
        }
    }

    // ── Form state ──────────────────────────────────────────────────

    /// Lowercased tag name of the first element matching the selector, or
    /// an empty string when nothing matches.
    pub async fn field_kind(&self, selector: &str) -> Result<String> {
        let selector_js =
            serde_json::to_string(selector).map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector_js});
                return el ? el.tagName.toLowerCase() : '';
            }})()
            "#,
        );
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        match result.into_value::<String>() {
            Ok(tag) => Ok(tag),
            Err(_) => Ok(String::new()),
        }
    }

    /// Live value of the field matching the selector (the DOM property, not
    /// the attribute, so typed input is visible).
    pub async fn field_value(&self, selector: &str) -> Result<String> {
        let selector_js =
            serde_json::to_string(selector).map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector_js});
                return el && el.value != null ? String(el.value) : '';
            }})()
            "#,
        );
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        match result.into_value::<String>() {
            Ok(value) => Ok(value),
            Err(_) => Ok(String::new()),
        }
    }

    /// Select an option in a `<select>` element by its value attribute and
    /// fire the change event the portal's scripts listen for.
    pub async fn set_select_value(&self, selector: &str, value: &str) -> Result<()> {
        let selector_js =
            serde_json::to_string(selector).map_err(|e| Error::JsError(e.to_string()))?;
        let value_js = serde_json::to_string(value).map_err(|e| Error::JsError(e.to_string()))?;
        let js = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector_js});
                if (!el) throw new Error('Element not found: ' + {selector_js});
                el.value = {value_js};
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            }})()
            "#,
        );
        self.inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        Ok(())
    }

    /// All form controls currently on the page.
    pub async fn form_fields(&self) -> Result<Vec<FormField>> {
        let js = r#"
            JSON.stringify(
                Array.from(document.querySelectorAll('input, select, textarea')).map(el => {
                    let label = '';
                    if (el.id) {
                        const labelEl = document.querySelector(`label[for="${el.id}"]`);
                        if (labelEl) label = (labelEl.innerText || '').trim();
                    }
                    if (!label && el.closest('label')) {
                        label = (el.closest('label').innerText || '').trim();
                    }
                    return {
                        tag: el.tagName.toLowerCase(),
                        type: el.type || '',
                        name: el.name || '',
                        id: el.id || '',
                        value: el.value || '',
                        label: label,
                        disabled: !!(el.disabled || el.readOnly)
                    };
                })
            )
        "#;
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        let json_str: String = result
            .into_value()
            .map_err(|e| Error::JsError(e.to_string()))?;
        let fields: Vec<FormField> =
            serde_json::from_str(&json_str).map_err(|e| Error::JsError(e.to_string()))?;
        Ok(fields)
    }
}
