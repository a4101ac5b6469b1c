//! SecureElement trait - capability to read and write data objects

use std::fmt;

use crate::model::Location;

/// How a write treats the existing object contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteMode {
    /// Overwrite bytes in place, keeping anything past the written range
    Write,
    /// Clear the object, then write
    EraseAndWrite,
}

impl WriteMode {
    /// Mode byte as sent on the command interface
    pub fn as_raw(self) -> u8 {
        match self {
            WriteMode::Write => 0x00,
            WriteMode::EraseAndWrite => 0x40,
        }
    }
}

/// Failure status returned by the secure element command layer
///
/// The object store treats every status as an opaque failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceStatus(u16);

impl DeviceStatus {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn code(self) -> u16 {
        self.0
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl std::error::Error for DeviceStatus {}

/// Capability to access data objects on a secure element
///
/// Implementations block until the device answers; bus locking and timeouts
/// belong to the implementation.
pub trait SecureElement {
    /// Write `data` into the object at `location`, starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns the device status if the command fails, e.g. when the data
    /// does not fit the object or the object is write-protected.
    fn write(
        &mut self,
        location: Location,
        mode: WriteMode,
        offset: u8,
        data: &[u8],
    ) -> Result<(), DeviceStatus>;

    /// Read the object at `location` from `offset` into `buffer`
    ///
    /// # Returns
    ///
    /// The number of bytes placed in `buffer`; objects longer than the
    /// buffer are truncated to it.
    fn read(
        &mut self,
        location: Location,
        offset: u8,
        buffer: &mut [u8],
    ) -> Result<usize, DeviceStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_mode_raw() {
        assert_eq!(WriteMode::Write.as_raw(), 0x00);
        assert_eq!(WriteMode::EraseAndWrite.as_raw(), 0x40);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DeviceStatus::new(0x8008).to_string(), "0x8008");
        assert_eq!(DeviceStatus::new(0x8008).code(), 0x8008);
    }
}
