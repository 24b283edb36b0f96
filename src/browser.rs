use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::debug;

use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::filler::{FormSession, SessionFactory};
use crate::input::FieldEntry;
use crate::page::Page;

/// Chrome flags that improve startup and load time without affecting the
/// portal's form behavior.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "no-default-browser-check",
    "no-first-run",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
    "disable-prompt-on-repost",
];

/// A live browser, exclusively owned by one fill run.
pub struct PortalBrowser {
    browser: CdpBrowser,
    element_timeout: std::time::Duration,
    handler_task: tokio::task::JoinHandle<()>,
}

impl PortalBrowser {
    /// Create a new BrowserBuilder for configuring and launching a browser.
    pub fn builder() -> crate::config::BrowserBuilder {
        crate::config::BrowserBuilder::new()
    }

    /// Launch a browser instance with the given configuration.
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let mut builder = CdpBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in PERF_ARGS {
            builder = builder.arg(*arg);
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        let cdp_config = builder
            .build()
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self {
            browser,
            element_timeout: config.element_timeout,
            handler_task,
        })
    }

    /// Open a page navigated to the given URL.
    pub async fn open(&self, url: &str) -> Result<Page> {
        let cdp_page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(Page::new(cdp_page, self.element_timeout))
    }

    /// Close the browser and stop the CDP event loop. A run calls this on
    /// every exit path so a failed fill does not leak the browser process.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await.map_err(Error::CdpError)?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

/// Production session factory: launches Chrome and navigates to the portal.
pub struct ChromeSessionFactory {
    config: BrowserConfig,
}

impl ChromeSessionFactory {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionFactory for ChromeSessionFactory {
    async fn open(&self, url: &str) -> Result<Box<dyn FormSession>> {
        let browser = PortalBrowser::launch(self.config.clone()).await?;
        let page = match browser.open(url).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                return Err(e);
            }
        };

        if tracing::enabled!(tracing::Level::DEBUG) {
            let title = page.title().await.unwrap_or_default();
            debug!(%title, "portal page opened");
            match page.form_fields().await {
                Ok(fields) => {
                    for f in &fields {
                        debug!(
                            tag = %f.tag,
                            r#type = %f.r#type,
                            name = %f.name,
                            id = %f.id,
                            label = %f.label,
                            disabled = f.disabled,
                            "form control on page"
                        );
                    }
                }
                Err(e) => debug!("form discovery failed: {e}"),
            }
        }

        Ok(Box::new(ChromeSession { browser, page }))
    }
}

/// A chromiumoxide-backed session writing into the live portal page.
struct ChromeSession {
    browser: PortalBrowser,
    page: Page,
}

#[async_trait]
impl FormSession for ChromeSession {
    async fn fill(&self, field: &FieldEntry) -> Result<()> {
        let element = self.page.wait_for_selector(&field.selector).await?;

        for attr in ["disabled", "readonly"] {
            if element.get_attribute(attr).await?.is_some() {
                return Err(Error::ValueRejected {
                    field: field.name.clone(),
                    reason: format!("element is {attr}"),
                });
            }
        }

        if self.page.field_kind(&field.selector).await? == "select" {
            self.page.set_select_value(&field.selector, &field.value).await
        } else {
            element.click().await?;
            element.type_text(&field.value).await
        }
    }

    async fn value_of(&self, field: &FieldEntry) -> Result<String> {
        self.page.field_value(&field.selector).await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self.page.wait_for_selector(selector).await?;
        element.click().await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromeSession { browser, page: _ } = *self;
        browser.close().await
    }
}
