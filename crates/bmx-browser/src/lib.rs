//! Browser session layer for the Beta Max verification harness
//!
//! Wraps Chrome DevTools Protocol (via `headless_chrome`) behind the
//! [`Session`] trait the runner interprets scenarios against. The trait seam
//! exists so the runner's lifecycle and step logic can be tested without a
//! browser.
//!
//! # Modules
//!
//! - [`browser`]: browser launch and raw page operations
//! - [`locator`]: resolution of scenario targets into CSS or XPath queries
//! - [`session`]: the `Session`/`SessionProvider` traits and the Chrome
//!   implementation

pub mod browser;
pub mod locator;
pub mod session;

pub use browser::{BrowserConfig, ChromeSession};
pub use locator::Query;
pub use session::{ChromeSessionProvider, Session, SessionProvider};
