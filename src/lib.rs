//! PKCS #11 object store PAL for secure elements
//!
//! Maps the token labels for the device certificate, device key pair and
//! code verification key onto data objects of a secure element, and reads
//! and writes those objects through the [`ports::SecureElement`] port.

pub mod adapters;
pub mod error;
mod logic;
pub mod model;
mod object_store;
pub mod ports;
pub mod use_cases;

pub use error::{PalError, PalResult};
pub use model::{
    LabelConfig, Location, ObjectHandle, ObjectValue, MAX_OBJECT_SIZE, READ_BUFFER_SIZE,
};
pub use object_store::ObjectStore;
pub use ports::{DeviceStatus, SecureElement, WriteMode};
