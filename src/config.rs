use std::time::Duration;

use crate::browser::PortalBrowser;
use crate::error::Result;

/// Browser-session configuration for one fill run.
#[derive(Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit Chrome/Chromium executable. When unset the browser is
    /// discovered on `PATH`.
    pub chrome_path: Option<String>,
    /// Deadline for element lookup (default: 20s). Portal pages load at
    /// unpredictable speed, so this is run-configurable.
    pub element_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            element_timeout: Duration::from_secs(20),
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the deadline for element lookup.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.element_timeout = timeout;
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<PortalBrowser> {
        PortalBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
