//! Input surfaces that edit the transform.
//!
//! Each surface only converts user input into a
//! [`TransformCommand`](crate::commands::TransformCommand); the session
//! owns the transform and applies it.

mod fields;
mod sliders;
mod shortcuts;

pub use fields::{parse_number, NumericField};
pub use sliders::{SliderRange, SliderTarget};
pub use shortcuts::{KeyInput, Modifiers, Shortcut};
