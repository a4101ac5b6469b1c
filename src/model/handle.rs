use std::fmt;

/// Token object handle
///
/// Handles are stable constants that name *which* recognized object was
/// referenced, never a stored instance. `Invalid` (0) is never issued for a
/// resolved object.
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectHandle {
    #[default]
    Invalid = 0,
    DevicePrivateKey = 1,
    DevicePublicKey = 2,
    DeviceCertificate = 3,
    CodeSigningKey = 4,
}

impl ObjectHandle {
    /// Raw value handed across the token API boundary
    pub fn as_raw(self) -> u64 {
        self as u64
    }

    /// Convert a raw token API value; anything unknown becomes `Invalid`
    pub fn from_raw(raw: u64) -> Self {
        match raw {
            1 => Self::DevicePrivateKey,
            2 => Self::DevicePublicKey,
            3 => Self::DeviceCertificate,
            4 => Self::CodeSigningKey,
            _ => Self::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }
}

impl From<ObjectHandle> for u64 {
    fn from(handle: ObjectHandle) -> Self {
        handle.as_raw()
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_zero() {
        assert_eq!(ObjectHandle::Invalid.as_raw(), 0);
        assert_eq!(ObjectHandle::default(), ObjectHandle::Invalid);
        assert!(!ObjectHandle::Invalid.is_valid());
    }

    #[test]
    fn test_raw_values_are_stable() {
        assert_eq!(ObjectHandle::DevicePrivateKey.as_raw(), 1);
        assert_eq!(ObjectHandle::DevicePublicKey.as_raw(), 2);
        assert_eq!(ObjectHandle::DeviceCertificate.as_raw(), 3);
        assert_eq!(ObjectHandle::CodeSigningKey.as_raw(), 4);
    }

    #[test]
    fn test_from_raw_unknown_is_invalid() {
        assert_eq!(ObjectHandle::from_raw(0), ObjectHandle::Invalid);
        assert_eq!(ObjectHandle::from_raw(5), ObjectHandle::Invalid);
        assert_eq!(ObjectHandle::from_raw(u64::MAX), ObjectHandle::Invalid);
        assert_eq!(
            ObjectHandle::from_raw(3),
            ObjectHandle::DeviceCertificate
        );
    }

    #[test]
    fn test_display_includes_raw_value() {
        assert_eq!(
            ObjectHandle::CodeSigningKey.to_string(),
            "CodeSigningKey(4)"
        );
    }
}
