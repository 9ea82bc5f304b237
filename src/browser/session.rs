use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::error::{ReachError, Result};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// How long to wait for a profile page to finish loading
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(25);

/// Blind settling delay before reading the DOM, to let the host page's own
/// dynamic rendering finish. Not a readiness signal.
const SETTLE_DELAY: Duration = Duration::from_millis(400);

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Set the browser's idle timeout to 1 hour (default is 30 seconds) to prevent the session from closing too soon
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ReachError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| ReachError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| ReachError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the first available tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;
        tabs.into_iter()
            .next()
            .ok_or_else(|| ReachError::TabOperationFailed("No open tab".to_string()))
    }

    /// Create a new tab
    pub fn new_tab(&self) -> Result<Arc<Tab>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| ReachError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;
        Ok(tab)
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ReachError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate the first tab to a URL
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| ReachError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete on the first tab
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| ReachError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Open a profile page in a fresh tab and wait for it to load.
    ///
    /// The tab is given a bounded load timeout; a page that does not finish
    /// loading within it is reported as [`ReachError::PageLoadTimeout`] and
    /// the tab is closed. The caller owns the returned tab and should close
    /// it with [`Self::close_tab`] once the page content has been captured.
    pub fn open_profile(&self, url: &str) -> Result<Arc<Tab>> {
        log::info!("Opening profile page: {}", url);

        let tab = self.new_tab()?;
        tab.set_default_timeout(PAGE_LOAD_TIMEOUT);

        if let Err(e) = tab.navigate_to(url) {
            let _ = tab.close(false);
            return Err(ReachError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)));
        }

        if let Err(e) = tab.wait_until_navigated() {
            let _ = tab.close(false);
            return Err(ReachError::PageLoadTimeout(format!("{} did not finish loading: {}", url, e)));
        }

        Ok(tab)
    }

    /// Capture the outer HTML of the rendered `<main>` element of a tab.
    ///
    /// Applies the fixed settling delay first so the page's dynamic sections
    /// have a chance to render. A page without a `<main>` element yields
    /// [`ReachError::MainContentMissing`].
    pub fn main_html(&self, tab: &Arc<Tab>) -> Result<String> {
        // small wait to let dynamic elements load
        std::thread::sleep(SETTLE_DELAY);

        let js_code = r#"
            (function () {
                const main = document.querySelector('main');
                return main ? main.outerHTML : null;
            })()
        "#;

        let result = tab
            .evaluate(js_code, false)
            .map_err(|e| ReachError::EvaluationFailed(format!("Failed to read page content: {}", e)))?;

        match result.value {
            Some(value) => match value.as_str() {
                Some(html) => Ok(html.to_string()),
                None => Err(ReachError::MainContentMissing),
            },
            None => Err(ReachError::MainContentMissing),
        }
    }

    /// Get the current URL of a tab
    pub fn tab_url(&self, tab: &Arc<Tab>) -> String {
        tab.get_url()
    }

    /// Close a tab, ignoring errors from tabs that are already gone
    pub fn close_tab(&self, tab: Arc<Tab>) {
        if let Err(e) = tab.close(false) {
            log::debug!("Failed to close tab: {}", e);
        }
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // The Browser struct has no public close method in headless_chrome;
        // closing every tab effectively shuts the session down and the
        // process exits when the Browser instance is dropped.
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(true).window_size(800, 600);

        assert!(opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
    }

    #[test]
    fn test_connection_options() {
        let opts = ConnectionOptions::new("ws://localhost:9222").timeout(5000);

        assert_eq!(opts.ws_url, "ws://localhost:9222");
        assert_eq!(opts.timeout, 5000);
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_navigate() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let result = session.navigate("about:blank");
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_main_html_capture() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let tab = session
            .open_profile("data:text/html,<html><body><main><h1>Jane Doe</h1></main></body></html>")
            .expect("Failed to open page");

        let html = session.main_html(&tab).expect("Failed to capture main element");
        assert!(html.contains("<main>"));
        assert!(html.contains("Jane Doe"));

        session.close_tab(tab);
    }

    #[test]
    #[ignore]
    fn test_main_html_missing() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let tab = session
            .open_profile("data:text/html,<html><body><div>No main here</div></body></html>")
            .expect("Failed to open page");

        let result = session.main_html(&tab);
        assert!(matches!(result, Err(ReachError::MainContentMissing)));

        session.close_tab(tab);
    }
}
