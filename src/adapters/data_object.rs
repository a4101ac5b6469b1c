//! Data object semantics shared by the emulated adapters

use crate::ports::{DeviceStatus, WriteMode};

/// Status codes reported by the emulated adapters
pub mod status {
    use crate::ports::DeviceStatus;

    pub const INVALID_OID: DeviceStatus = DeviceStatus::new(0x8001);
    pub const INVALID_PARAM: DeviceStatus = DeviceStatus::new(0x8003);
    pub const MEMORY_CAPACITY_EXCEEDED: DeviceStatus = DeviceStatus::new(0x8008);
    pub const WRITE_ACCESS_DENIED: DeviceStatus = DeviceStatus::new(0x8009);
    pub const READ_ACCESS_DENIED: DeviceStatus = DeviceStatus::new(0x800A);
    pub const COMMUNICATION_FAILURE: DeviceStatus = DeviceStatus::new(0xFFFF);
}

/// Capacity of the certificate and trust anchor objects on the reference part
pub const DEFAULT_CAPACITY: usize = 1728;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DataObject {
    capacity: usize,
    data: Vec<u8>,
    access: Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    ReadWrite,
    ReadOnly,
    /// Key objects: contents never leave the chip
    Sealed,
}

impl DataObject {
    pub(crate) fn new(capacity: usize, access: Access) -> Self {
        Self {
            capacity,
            data: Vec::new(),
            access,
        }
    }

    pub(crate) fn with_contents(capacity: usize, access: Access, data: Vec<u8>) -> Self {
        Self {
            capacity,
            data,
            access,
        }
    }

    pub(crate) fn contents(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn set_access(&mut self, access: Access) {
        self.access = access;
    }

    pub(crate) fn write(
        &mut self,
        mode: WriteMode,
        offset: u8,
        data: &[u8],
    ) -> Result<(), DeviceStatus> {
        if self.access != Access::ReadWrite {
            return Err(status::WRITE_ACCESS_DENIED);
        }

        let start = usize::from(offset);
        let end = start + data.len();
        if end > self.capacity {
            return Err(status::MEMORY_CAPACITY_EXCEEDED);
        }

        if mode == WriteMode::EraseAndWrite {
            self.data.clear();
        }
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(data);
        Ok(())
    }

    pub(crate) fn read(&self, offset: u8, buffer: &mut [u8]) -> Result<usize, DeviceStatus> {
        if self.access == Access::Sealed {
            return Err(status::READ_ACCESS_DENIED);
        }

        let start = usize::from(offset);
        if start > self.data.len() {
            return Err(status::INVALID_PARAM);
        }

        let available = &self.data[start..];
        let len = available.len().min(buffer.len());
        buffer[..len].copy_from_slice(&available[..len]);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_past_current_length_zero_fills() {
        let mut object = DataObject::new(16, Access::ReadWrite);
        object.write(WriteMode::Write, 3, &[7]).unwrap();
        assert_eq!(object.contents(), &[0, 0, 0, 7]);
    }

    #[test]
    fn test_capacity_counts_offset() {
        let mut object = DataObject::new(8, Access::ReadWrite);
        assert!(object.write(WriteMode::EraseAndWrite, 0, &[1; 8]).is_ok());
        assert_eq!(
            object.write(WriteMode::Write, 1, &[1; 8]),
            Err(status::MEMORY_CAPACITY_EXCEEDED)
        );
    }

    #[test]
    fn test_read_only_and_sealed_objects() {
        let mut object = DataObject::with_contents(8, Access::ReadOnly, vec![5, 6]);
        assert_eq!(
            object.write(WriteMode::EraseAndWrite, 0, &[1]),
            Err(status::WRITE_ACCESS_DENIED)
        );
        let mut buffer = [0u8; 4];
        assert_eq!(object.read(0, &mut buffer), Ok(2));

        object.set_access(Access::Sealed);
        assert_eq!(
            object.read(0, &mut buffer),
            Err(status::READ_ACCESS_DENIED)
        );
    }

    #[test]
    fn test_read_offset_past_end() {
        let object = DataObject::with_contents(8, Access::ReadWrite, vec![1, 2]);
        let mut buffer = [0u8; 4];
        assert_eq!(object.read(2, &mut buffer), Ok(0));
        assert_eq!(object.read(3, &mut buffer), Err(status::INVALID_PARAM));
    }
}
