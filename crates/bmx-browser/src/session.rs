//! The session seam between the runner and the browser
//!
//! [`Session`] is everything the step interpreter needs from a page;
//! [`SessionProvider`] hands out one isolated session per scenario. The
//! Chrome implementations live here, and the runner's tests substitute mocks.

use crate::browser::{BrowserConfig, ChromeSession};
use crate::locator::{self, Query};
use async_trait::async_trait;
use bmx_core::{Result, Target};
use serde_json::json;
use tracing::debug;

/// Operations a scenario step can perform against a live page
///
/// Action methods return `Ok(false)` when nothing matches the target at this
/// instant; the runner polls them, so a transiently missing element is not an
/// error. `Err` is reserved for session-level trouble (crash, lost tab).
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate to an absolute URL and wait for the load to settle
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Replace a form field's value, firing input and change events
    async fn fill(&self, target: &Target, value: &str) -> Result<bool>;

    /// Click the first element matching the target
    async fn click(&self, target: &Target) -> Result<bool>;

    /// Set a `<select>` element's value, firing its change event
    async fn select_option(&self, target: &Target, value: &str) -> Result<bool>;

    /// Whether the target exists and is currently rendered
    async fn is_visible(&self, target: &Target) -> Result<bool>;

    /// Current `value` property, or None when the target is absent
    async fn value_of(&self, target: &Target) -> Result<Option<String>>;

    /// Current attribute value, or None when absent or unset
    async fn attribute_of(&self, target: &Target, attribute: &str) -> Result<Option<String>>;

    /// Full-page PNG screenshot
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Release the session; called exactly once per scenario
    async fn close(&self) -> Result<()>;
}

/// Hands out fresh isolated sessions, one per scenario
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn Session>>;
}

// Field fill that React-style controlled inputs observe: set the value
// through the prototype setter, then dispatch input + change.
const FILL_FN: &str = r#"
function (value) {
    this.focus();
    const proto = this.tagName === 'TEXTAREA'
        ? window.HTMLTextAreaElement.prototype
        : window.HTMLInputElement.prototype;
    const descriptor = Object.getOwnPropertyDescriptor(proto, 'value');
    if (descriptor && descriptor.set) {
        descriptor.set.call(this, value);
    } else {
        this.value = value;
    }
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}
"#;

const SELECT_FN: &str = r#"
function (value) {
    const descriptor = Object.getOwnPropertyDescriptor(
        window.HTMLSelectElement.prototype, 'value');
    if (descriptor && descriptor.set) {
        descriptor.set.call(this, value);
    } else {
        this.value = value;
    }
    this.dispatchEvent(new Event('change', { bubbles: true }));
}
"#;

const VISIBLE_FN: &str = r#"
function () {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.display !== 'none' && style.visibility !== 'hidden';
}
"#;

const VALUE_FN: &str = r#"
function () {
    return 'value' in this ? String(this.value) : null;
}
"#;

const ATTRIBUTE_FN: &str = r#"
function (name) {
    return this.getAttribute(name);
}
"#;

#[async_trait]
impl Session for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url)
    }

    async fn fill(&self, target: &Target, value: &str) -> Result<bool> {
        let query = locator::resolve(target);
        match self.find(&query)? {
            Some(element) => {
                self.call_on(&element, FILL_FN, vec![json!(value)])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn click(&self, target: &Target) -> Result<bool> {
        let query = locator::resolve(target);
        match self.find(&query)? {
            Some(element) => {
                self.click_element(&element)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn select_option(&self, target: &Target, value: &str) -> Result<bool> {
        let query = locator::resolve(target);
        match self.find(&query)? {
            Some(element) => {
                self.call_on(&element, SELECT_FN, vec![json!(value)])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_visible(&self, target: &Target) -> Result<bool> {
        let query = locator::resolve(target);
        match self.find(&query)? {
            Some(element) => {
                let visible = self.call_on(&element, VISIBLE_FN, vec![])?;
                Ok(visible.as_bool().unwrap_or(false))
            }
            None => Ok(false),
        }
    }

    async fn value_of(&self, target: &Target) -> Result<Option<String>> {
        let query = locator::resolve(target);
        match self.find(&query)? {
            Some(element) => {
                let value = self.call_on(&element, VALUE_FN, vec![])?;
                Ok(value.as_str().map(str::to_string))
            }
            None => Ok(None),
        }
    }

    async fn attribute_of(&self, target: &Target, attribute: &str) -> Result<Option<String>> {
        let query = locator::resolve(target);
        match self.find(&query)? {
            Some(element) => {
                let value = self.call_on(&element, ATTRIBUTE_FN, vec![json!(attribute)])?;
                Ok(value.as_str().map(str::to_string))
            }
            None => Ok(None),
        }
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.screenshot_png()
    }

    async fn close(&self) -> Result<()> {
        debug!("Closing browser session");
        // Dropping the session tears down the browser process
        Ok(())
    }
}

/// Launches one fresh browser process per scenario
pub struct ChromeSessionProvider {
    config: BrowserConfig,
}

impl ChromeSessionProvider {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionProvider for ChromeSessionProvider {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        let session = ChromeSession::launch(&self.config)?;
        Ok(Box::new(session))
    }
}
