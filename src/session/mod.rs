//! Browser session module
//!
//! This module wraps a page renderer behind two small traits and adds the
//! navigation-time defenses the site requires:
//! - consent/cookie dialogs are clicked away after each load
//! - "show all" disclosure links are expanded
//! - a banned address aborts the job
//! - a rate-limited session is torn down, relaunched and the load retried

mod chrome;
mod controller;
mod renderer;

pub use chrome::{ChromeLauncher, ChromeRenderer};
pub use controller::Session;
pub use renderer::{Launcher, PageRenderer, RenderError};
