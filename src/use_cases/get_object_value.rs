//! Get object value use case

use tracing::{debug, warn};

use crate::error::{PalError, PalResult};
use crate::logic::readable_location;
use crate::model::{LabelTable, ObjectHandle, ObjectValue, READ_BUFFER_SIZE};
use crate::ports::SecureElement;

/// Read back the object behind `handle`
///
/// # Errors
///
/// `PalError::KeyHandleInvalid` for the private key handle, for unknown
/// handles (both rejected before any device access), and when the device
/// read fails.
pub fn get_object_value<S>(
    device: &mut S,
    table: &LabelTable,
    handle: ObjectHandle,
) -> PalResult<ObjectValue>
where
    S: SecureElement + ?Sized,
{
    let invalid = || PalError::KeyHandleInvalid {
        handle: handle.as_raw(),
    };

    let location = readable_location(table, handle).ok_or_else(invalid)?;

    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let len = device.read(location, 0, &mut buffer).map_err(|status| {
        warn!("Reading {} from {} failed with status {}", handle, location, status);
        invalid()
    })?;
    buffer.truncate(len);

    debug!("Read {} bytes of {} from {}", len, handle, location);
    Ok(ObjectValue::exportable(buffer))
}
