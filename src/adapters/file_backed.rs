//! File-backed secure element
//!
//! Keeps one file per object in a directory: `<LOCATION>.bin` for data
//! objects and `<LOCATION>.key` for key objects. Used by the CLI for
//! host-side provisioning runs without hardware.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::data_object::{status, Access, DataObject, DEFAULT_CAPACITY};
use crate::error::{DeviceError, PalError, PalResult};
use crate::model::{Capability, LabelConfig, Location, ObjectKind};
use crate::ports::{DeviceStatus, SecureElement, WriteMode};

#[derive(Debug, Clone)]
pub struct FileSecureElement {
    dir: PathBuf,
    capacity: usize,
}

impl FileSecureElement {
    /// Open (creating if needed) an object directory
    pub fn open(dir: impl Into<PathBuf>) -> PalResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| connection_failed(&dir, e))?;
        Ok(Self {
            dir,
            capacity: DEFAULT_CAPACITY,
        })
    }

    /// Capacity applied to every data object
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create an empty data object unless one already exists
    pub fn provision(&self, location: Location) -> PalResult<()> {
        let path = self.data_path(location);
        if !path.exists() {
            fs::write(&path, b"").map_err(|e| connection_failed(&path, e))?;
            debug!("Provisioned data object {}", location);
        }
        Ok(())
    }

    /// Create a key object marker unless one already exists
    pub fn provision_key_object(&self, location: Location) -> PalResult<()> {
        let path = self.key_path(location);
        if !path.exists() {
            fs::write(&path, b"").map_err(|e| connection_failed(&path, e))?;
            debug!("Provisioned key object {}", location);
        }
        Ok(())
    }

    /// Provision the object behind every configured label
    ///
    /// Labels that do not parse to a location are skipped.
    pub fn provision_labels(&self, labels: &LabelConfig) -> PalResult<()> {
        for kind in ObjectKind::ALL {
            let label = labels.label(kind);
            let location = match Location::parse_label(label.as_bytes()) {
                Ok(location) => location,
                Err(e) => {
                    warn!("Not provisioning {:?} label {:?}: {}", kind, label, e);
                    continue;
                }
            };
            match kind.capability() {
                Capability::Writable => self.provision(location)?,
                Capability::Unsupported => self.provision_key_object(location)?,
            }
        }
        Ok(())
    }

    fn data_path(&self, location: Location) -> PathBuf {
        self.dir.join(format!("{:04X}.bin", location.get()))
    }

    fn key_path(&self, location: Location) -> PathBuf {
        self.dir.join(format!("{:04X}.key", location.get()))
    }

    fn load(&self, location: Location) -> Result<DataObject, DeviceStatus> {
        if self.key_path(location).exists() {
            return Ok(DataObject::new(0, Access::Sealed));
        }

        match fs::read(self.data_path(location)) {
            Ok(data) => Ok(DataObject::with_contents(
                self.capacity,
                Access::ReadWrite,
                data,
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(status::INVALID_OID),
            Err(e) => {
                warn!("Failed to load object {}: {}", location, e);
                Err(status::COMMUNICATION_FAILURE)
            }
        }
    }

    fn store(&self, location: Location, object: &DataObject) -> Result<(), DeviceStatus> {
        fs::write(self.data_path(location), object.contents()).map_err(|e| {
            warn!("Failed to store object {}: {}", location, e);
            status::COMMUNICATION_FAILURE
        })
    }
}

fn connection_failed(path: &Path, err: std::io::Error) -> PalError {
    PalError::Device(DeviceError::ConnectionFailed {
        reason: format!("{}: {}", path.display(), err),
    })
}

impl SecureElement for FileSecureElement {
    fn write(
        &mut self,
        location: Location,
        mode: WriteMode,
        offset: u8,
        data: &[u8],
    ) -> Result<(), DeviceStatus> {
        let mut object = self.load(location)?;
        object.write(mode, offset, data)?;
        self.store(location, &object)?;

        debug!(
            "Stored {} bytes in {} ({} of {} bytes used)",
            data.len(),
            location,
            object.contents().len(),
            object.capacity()
        );
        Ok(())
    }

    fn read(
        &mut self,
        location: Location,
        offset: u8,
        buffer: &mut [u8],
    ) -> Result<usize, DeviceStatus> {
        self.load(location)?.read(offset, buffer)
    }
}
