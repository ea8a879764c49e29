//! Input module - Terminal commands to pointer gestures
//!
//! The binary has no pointing device; each stdin line is parsed into the
//! same [`PointerEvent`]s a graphical surface would report.
//!
//! - `pointer` - Command parsing and the stdin reader task
//!
//! [`PointerEvent`]: crate::game::PointerEvent

pub mod pointer;

pub use pointer::*;
