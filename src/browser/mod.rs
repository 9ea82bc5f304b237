//! Browser session management
//!
//! Wraps a Chrome/Chromium instance driven over the Chrome DevTools Protocol
//! and exposes the page-level operations the scraping pipeline needs:
//! navigation, background profile tabs with a load timeout, and capture of
//! the rendered main content element.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
