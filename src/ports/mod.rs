//! Ports (traits) for secure element access
//!
//! The object store depends on these abstractions, not on a concrete
//! command library. Adapters in `crate::adapters` provide implementations.

mod secure_element;

pub use secure_element::{DeviceStatus, SecureElement, WriteMode};
