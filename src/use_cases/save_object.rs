//! Save object use case
//!
//! Translates a token object label into a data object write.

use tracing::{debug, info, warn};

use crate::model::{Capability, LabelTable, ObjectHandle, MAX_OBJECT_SIZE};
use crate::ports::{SecureElement, WriteMode};

/// Store `data` in the object named by `label`
///
/// # Returns
///
/// The object's handle, or `ObjectHandle::Invalid` when nothing was stored:
/// oversized payload, unrecognized label, unresolvable location, or a
/// failed write. The private key label is accepted without touching the
/// device, since key material cannot be imported.
pub fn save_object<S>(
    device: &mut S,
    table: &LabelTable,
    label: &[u8],
    data: &[u8],
) -> ObjectHandle
where
    S: SecureElement + ?Sized,
{
    if data.len() > MAX_OBJECT_SIZE {
        warn!(
            "Refusing to save {} bytes (maximum {})",
            data.len(),
            MAX_OBJECT_SIZE
        );
        return ObjectHandle::Invalid;
    }

    let Some(entry) = table.lookup(label) else {
        debug!("No object for label {:?}", String::from_utf8_lossy(label));
        return ObjectHandle::Invalid;
    };

    if entry.capability() == Capability::Unsupported {
        debug!("{:?} cannot be imported; issuing handle only", entry.kind);
        return entry.handle();
    }

    let location = match entry.location {
        Ok(location) => location,
        Err(e) => {
            warn!("{:?} label has no usable location: {}", entry.kind, e);
            return ObjectHandle::Invalid;
        }
    };
    if u16::try_from(data.len()).is_err() {
        return ObjectHandle::Invalid;
    }

    match device.write(location, WriteMode::EraseAndWrite, 0, data) {
        Ok(()) => {
            info!(
                "Saved {} bytes of {:?} to {}",
                data.len(),
                entry.kind,
                location
            );
            entry.handle()
        }
        Err(status) => {
            warn!(
                "Writing {:?} to {} failed with status {}",
                entry.kind, location, status
            );
            ObjectHandle::Invalid
        }
    }
}
