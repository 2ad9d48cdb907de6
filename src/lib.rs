//! G600 Controller - Logitech G600 side-button remapper
//!
//! Grabs the G600's keyboard interface, decodes its scan/key record pairs and
//! runs a shell command for every press and release, with a second command
//! layer selected by the G-Shift button.

pub mod cli;
pub mod controller;
pub mod decoder;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod keymap;
pub mod logging;

pub use error::{ControllerError, Result};
