mod handle;
mod label;
mod location;
mod object_value;

pub use handle::ObjectHandle;
pub use label::{Capability, LabelConfig, LabelEntry, LabelError, LabelTable, ObjectKind};
pub use location::{Location, LocationError};
pub use object_value::ObjectValue;

/// Largest payload accepted by a save
pub const MAX_OBJECT_SIZE: usize = 2048;

/// Buffer allocated for each read. Smaller than `MAX_OBJECT_SIZE`, so objects
/// written close to the maximum come back truncated.
pub const READ_BUFFER_SIZE: usize = 1200;
