//! Integration tests
//!
//! Every test drives the library against a scripted fake browser: pages are
//! served from memory, so no browser or network is needed.

mod common;
mod resolver_tests;
mod session_tests;
mod walker_tests;
