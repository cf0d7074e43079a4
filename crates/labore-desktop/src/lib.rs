//! labore-desktop library root.
//!
//! The composition root for the checklist app. Modules are public so the
//! integration tests can drive the commands against a temporary data
//! directory, the same way `main` does against the real one.

pub mod commands;
pub mod config;
pub mod interactive;
pub mod selftest;
pub mod state;
