//! Sograph Login Bot Library
//!
//! Support crate for a Sograph Telegram bot farm.
//!
//! This crate provides the core functionality for:
//! - Loading farm settings from environment variables
//! - Enumerating locally persisted session files
//! - Loading and normalizing proxy lists
//! - Provisioning a headless browser and driving the web login flow

pub mod browser;
pub mod config;
pub mod sessions;
pub mod utils;
