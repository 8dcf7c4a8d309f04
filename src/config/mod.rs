//! Configuration module for the farm helper.
//!
//! Handles environment-based settings and the optional proxy list.

mod proxies;
mod settings;

pub use proxies::{Proxy, ProxyError, load_proxies, PROXIES_PATH};
pub use settings::{ConfigError, Settings};
