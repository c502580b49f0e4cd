//! Terminal market board fed by a [`quote_feed`] provider.
//!
//! - [`board`] holds the state machine and the polling controller.
//! - [`config`] loads the optional TOML settings.
//! - [`providers`] maps the configured vendor to a provider instance.
//! - [`render`] draws a snapshot as text.

#![deny(missing_docs)]

pub mod board;
pub mod config;
pub mod demo;
pub mod identity;
pub mod providers;
pub mod render;
