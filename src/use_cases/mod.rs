//! Use cases (orchestration)
//!
//! Each use case resolves a label or handle through the label table and
//! drives the secure element port.

mod get_object_value;
mod save_object;

pub use get_object_value::get_object_value;
pub use save_object::save_object;
