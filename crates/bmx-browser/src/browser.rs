//! Browser lifecycle management using Chrome DevTools Protocol

use crate::locator::Query;
use bmx_core::{HarnessError, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 800,
            timeout_seconds: 30,
        }
    }
}

/// One live browser process with a single active tab
///
/// Each scenario gets its own `ChromeSession`, so cookies and local storage
/// never leak between scenarios. Dropping the session tears the browser down.
pub struct ChromeSession {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Current active tab
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch a fresh browser with the given configuration
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, size: {}x{})",
            config.headless, config.window_width, config.window_height
        );

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .build()
            .map_err(|e| HarnessError::Browser(format!("failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| HarnessError::Browser(format!("failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| HarnessError::Browser(format!("failed to create tab: {}", e)))?;
        tab.set_default_timeout(std::time::Duration::from_secs(config.timeout_seconds));

        debug!("Browser launched");
        Ok(Self { browser, tab })
    }

    /// Navigate to a URL and wait for the navigation to settle
    pub fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| HarnessError::Session(format!("failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| HarnessError::Session(format!("navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Find an element right now, without waiting
    ///
    /// Returns `Ok(None)` when nothing matches; the wait primitives poll this.
    pub fn find(&self, query: &Query) -> Result<Option<Element<'_>>> {
        let found = match query {
            Query::Css(selector) => self.tab.find_element(selector),
            Query::XPath(xpath) => self.tab.find_element_by_xpath(xpath),
        };

        match found {
            Ok(element) => Ok(Some(element)),
            // headless_chrome reports "no node found" as an error
            Err(_) => Ok(None),
        }
    }

    /// Call a JS function with the element as `this`, returning its result
    pub fn call_on(
        &self,
        element: &Element<'_>,
        function: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let remote = element
            .call_js_fn(function, args, false)
            .map_err(|e| HarnessError::Session(format!("script call failed: {}", e)))?;
        Ok(remote.value.unwrap_or(serde_json::Value::Null))
    }

    /// Click an element via CDP input events
    pub fn click_element(&self, element: &Element<'_>) -> Result<()> {
        element
            .click()
            .map_err(|e| HarnessError::Session(format!("click failed: {}", e)))?;
        Ok(())
    }

    /// Capture a full-page PNG screenshot
    pub fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| HarnessError::Session(format!("screenshot capture failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 800);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_custom_config() {
        let config = BrowserConfig {
            headless: false,
            window_width: 1920,
            window_height: 1080,
            timeout_seconds: 60,
        };
        assert!(!config.headless);
        assert_eq!(config.window_width, 1920);
    }
}
