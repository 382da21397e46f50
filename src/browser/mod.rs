//! Chrome/Chromium backend for the engine traits
//!
//! - [`ChromeBrowser`]: launch or connect to Chrome and expose its tabs as [`crate::engine::BlockingPage`]s
//! - [`LaunchOptions`] / [`ConnectionOptions`]: configuration

pub mod chrome;
pub mod config;

pub use chrome::{ChromeBrowser, ChromeTab};
pub use config::{ConnectionOptions, LaunchOptions};
