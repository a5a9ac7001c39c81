//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, pointer, hotkeys)
//! - Storage (LocalStorage on web, in-memory on native)

pub mod input;
pub mod storage;

pub use input::{Command, InputState};
