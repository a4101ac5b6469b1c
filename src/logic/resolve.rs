//! Pure label and handle resolution over the label table

use crate::model::{Capability, LabelTable, Location, ObjectHandle, ObjectKind};

/// Handle for `label`, or `Invalid` when the label is not recognized
pub fn find_handle(table: &LabelTable, label: &[u8]) -> ObjectHandle {
    table
        .lookup(label)
        .map(|entry| entry.handle())
        .unwrap_or(ObjectHandle::Invalid)
}

/// Location that may be read back for `handle`
///
/// `None` for the private key, for unknown handles, and for labels that do
/// not parse to a location.
pub fn readable_location(table: &LabelTable, handle: ObjectHandle) -> Option<Location> {
    let kind = ObjectKind::from_handle(handle)?;
    let entry = table.entry(kind);
    match entry.capability() {
        Capability::Writable => entry.location.ok(),
        Capability::Unsupported => None,
    }
}
