//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, list, init)
//! - [`extract`] - Pull a coordinate out of piped text
//! - [`minimap`] - Write a static map image for a coordinate
//! - [`resolve`] - One-shot place resolution
//! - [`watch`] - Live HUD fed from standard input

pub mod common;
pub mod config;
pub mod extract;
pub mod minimap;
pub mod resolve;
pub mod watch;
