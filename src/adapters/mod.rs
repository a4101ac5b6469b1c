//! Adapters - concrete implementations of the secure element port

mod data_object;
mod emulated;
mod file_backed;

pub use data_object::{status, DEFAULT_CAPACITY};
pub use emulated::{Command, EmulatedSecureElement};
pub use file_backed::FileSecureElement;
