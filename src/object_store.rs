//! Object store adapter
//!
//! Owns the secure element transport and the label table for the lifetime
//! of the process and exposes the four operations the token layer calls.

use tracing::debug;

use crate::error::PalResult;
use crate::logic::find_handle;
use crate::model::{LabelConfig, LabelTable, ObjectHandle, ObjectValue};
use crate::ports::SecureElement;
use crate::use_cases::{get_object_value, save_object};

#[derive(Debug)]
pub struct ObjectStore<S> {
    device: S,
    labels: LabelTable,
}

impl<S: SecureElement> ObjectStore<S> {
    /// Object store over `device` using the default labels
    pub fn new(device: S) -> Self {
        Self {
            device,
            labels: LabelTable::default(),
        }
    }

    /// Object store over `device` using caller supplied labels
    ///
    /// # Errors
    ///
    /// Returns `PalError::Label` if a label is empty or shared by two objects.
    pub fn with_labels(device: S, config: &LabelConfig) -> PalResult<Self> {
        let labels = LabelTable::new(config)?;
        Ok(Self { device, labels })
    }

    /// Persist an object; see [`save_object`]
    pub fn save(&mut self, label: &[u8], data: &[u8]) -> ObjectHandle {
        save_object(&mut self.device, &self.labels, label, data)
    }

    /// Look up the handle for a label without touching the device
    pub fn find(&self, label: &[u8]) -> ObjectHandle {
        find_handle(&self.labels, label)
    }

    /// Read an object back; see [`get_object_value`]
    pub fn get_value(&mut self, handle: ObjectHandle) -> PalResult<ObjectValue> {
        get_object_value(&mut self.device, &self.labels, handle)
    }

    /// Release a buffer returned by [`ObjectStore::get_value`]
    ///
    /// `None` is accepted and ignored, so callers can release on every exit
    /// path without tracking whether the read succeeded.
    pub fn release_value(&self, value: Option<ObjectValue>) {
        if let Some(value) = value {
            debug!("Releasing {} byte object buffer", value.len());
            drop(value);
        }
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn device(&self) -> &S {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut S {
        &mut self.device
    }

    pub fn into_device(self) -> S {
        self.device
    }
}
