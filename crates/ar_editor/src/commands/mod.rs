//! Edit commands.

mod transform_commands;

pub use transform_commands::TransformCommand;
