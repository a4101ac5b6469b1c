//! In-memory secure element
//!
//! Emulates the data object store of a secure element and records every
//! command it receives, so host-side code and tests can check device traffic.

use std::collections::BTreeMap;

use tracing::debug;

use super::data_object::{status, Access, DataObject, DEFAULT_CAPACITY};
use crate::model::{LabelConfig, Location};
use crate::ports::{DeviceStatus, SecureElement, WriteMode};

/// A command as received by the emulated device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write {
        location: Location,
        mode: WriteMode,
        offset: u8,
        data: Vec<u8>,
    },
    Read {
        location: Location,
        offset: u8,
        buffer_len: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EmulatedSecureElement {
    objects: BTreeMap<Location, DataObject>,
    commands: Vec<Command>,
    failure: Option<DeviceStatus>,
}

impl EmulatedSecureElement {
    /// Device with no provisioned objects
    pub fn new() -> Self {
        Self::default()
    }

    /// Device provisioned like a factory part: writable data objects behind
    /// the default certificate, public key and code verification labels, and
    /// a sealed key object behind the private key label.
    pub fn with_default_objects() -> Self {
        let mut device = Self::new();
        for label in [
            LabelConfig::DEFAULT_DEVICE_CERTIFICATE,
            LabelConfig::DEFAULT_DEVICE_PUBLIC_KEY,
            LabelConfig::DEFAULT_CODE_VERIFICATION_KEY,
        ] {
            if let Ok(location) = Location::parse_label(label.as_bytes()) {
                device.provision(location, DEFAULT_CAPACITY);
            }
        }
        if let Ok(location) = Location::parse_label(LabelConfig::DEFAULT_DEVICE_PRIVATE_KEY.as_bytes())
        {
            device.provision_key_object(location);
        }
        device
    }

    /// Create an empty writable data object
    pub fn provision(&mut self, location: Location, capacity: usize) -> &mut Self {
        self.objects
            .insert(location, DataObject::new(capacity, Access::ReadWrite));
        self
    }

    /// Create a key object whose contents can be neither read nor written
    pub fn provision_key_object(&mut self, location: Location) -> &mut Self {
        self.objects
            .insert(location, DataObject::new(0, Access::Sealed));
        self
    }

    /// Make a data object read-only, as locking its metadata would
    pub fn lock(&mut self, location: Location) -> &mut Self {
        if let Some(object) = self.objects.get_mut(&location) {
            object.set_access(Access::ReadOnly);
        }
        self
    }

    /// Fail every following command with `status` (or stop failing on `None`)
    pub fn fail_with(&mut self, status: Option<DeviceStatus>) -> &mut Self {
        self.failure = status;
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn contents(&self, location: Location) -> Option<&[u8]> {
        self.objects.get(&location).map(DataObject::contents)
    }
}

impl SecureElement for EmulatedSecureElement {
    fn write(
        &mut self,
        location: Location,
        mode: WriteMode,
        offset: u8,
        data: &[u8],
    ) -> Result<(), DeviceStatus> {
        self.commands.push(Command::Write {
            location,
            mode,
            offset,
            data: data.to_vec(),
        });
        if let Some(status) = self.failure {
            debug!("Emulated write to {} failing with {}", location, status);
            return Err(status);
        }

        let object = self
            .objects
            .get_mut(&location)
            .ok_or(status::INVALID_OID)?;
        object.write(mode, offset, data)?;

        debug!("Emulated write of {} bytes to {}", data.len(), location);
        Ok(())
    }

    fn read(
        &mut self,
        location: Location,
        offset: u8,
        buffer: &mut [u8],
    ) -> Result<usize, DeviceStatus> {
        self.commands.push(Command::Read {
            location,
            offset,
            buffer_len: buffer.len(),
        });
        if let Some(status) = self.failure {
            debug!("Emulated read from {} failing with {}", location, status);
            return Err(status);
        }

        let object = self.objects.get(&location).ok_or(status::INVALID_OID)?;
        object.read(offset, buffer)
    }
}
