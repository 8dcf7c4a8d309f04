//! Headless browser provisioning and automation.
//!
//! Provides a one-time browser download, a scoped browser-session factory
//! with a fixed mobile emulation profile, and the web login flow that
//! extracts a signature from intercepted traffic.

mod login;
mod provision;
mod session;

use thiserror::Error;

pub use login::{LOGIN_ENDPOINT, PAGE_SETTLE_DELAY, login_in_browser};
pub use provision::{BROWSER_DIR, ensure_browser};
pub use session::BrowserSession;

/// Emulated viewport width in CSS pixels.
pub const DEVICE_WIDTH: u32 = 375;

/// Emulated viewport height in CSS pixels.
pub const DEVICE_HEIGHT: u32 = 812;

/// Emulated device pixel ratio.
pub const DEVICE_PIXEL_RATIO: f64 = 3.0;

/// User agent presented by the emulated device.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; RMX3630 Build/TP1A.220905.001; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/125.0.6422.165 Mobile Safari/537.36";

/// Errors that can occur during browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to provision browser: {0}")]
    Provision(String),

    #[error("Invalid browser configuration: {0}")]
    Config(String),

    #[error("Browser command failed: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Intercepted response body could not be decoded: {0}")]
    BodyDecode(String),

    #[error("Intercepted response was not valid JSON: {0}")]
    ResponseParse(#[from] serde_json::Error),
}
