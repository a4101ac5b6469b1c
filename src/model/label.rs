use super::{Location, LocationError, ObjectHandle};
use thiserror::Error;

/// The recognized token objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    DeviceCertificate,
    DevicePublicKey,
    DevicePrivateKey,
    CodeVerificationKey,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::DeviceCertificate,
        ObjectKind::DevicePublicKey,
        ObjectKind::DevicePrivateKey,
        ObjectKind::CodeVerificationKey,
    ];

    pub fn handle(self) -> ObjectHandle {
        match self {
            ObjectKind::DeviceCertificate => ObjectHandle::DeviceCertificate,
            ObjectKind::DevicePublicKey => ObjectHandle::DevicePublicKey,
            ObjectKind::DevicePrivateKey => ObjectHandle::DevicePrivateKey,
            ObjectKind::CodeVerificationKey => ObjectHandle::CodeSigningKey,
        }
    }

    pub fn from_handle(handle: ObjectHandle) -> Option<Self> {
        match handle {
            ObjectHandle::DeviceCertificate => Some(ObjectKind::DeviceCertificate),
            ObjectHandle::DevicePublicKey => Some(ObjectKind::DevicePublicKey),
            ObjectHandle::DevicePrivateKey => Some(ObjectKind::DevicePrivateKey),
            ObjectHandle::CodeSigningKey => Some(ObjectKind::CodeVerificationKey),
            ObjectHandle::Invalid => None,
        }
    }

    /// Private keys never leave the secure element, so their slot is neither
    /// written nor read through the object store.
    pub fn capability(self) -> Capability {
        match self {
            ObjectKind::DevicePrivateKey => Capability::Unsupported,
            ObjectKind::DeviceCertificate
            | ObjectKind::DevicePublicKey
            | ObjectKind::CodeVerificationKey => Capability::Writable,
        }
    }

    fn index(self) -> usize {
        match self {
            ObjectKind::DeviceCertificate => 0,
            ObjectKind::DevicePublicKey => 1,
            ObjectKind::DevicePrivateKey => 2,
            ObjectKind::CodeVerificationKey => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Writable,
    Unsupported,
}

/// Label strings for the four recognized objects
///
/// Each label doubles as the hexadecimal address of its data object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConfig {
    pub device_certificate: String,
    pub device_public_key: String,
    pub device_private_key: String,
    pub code_verification_key: String,
}

impl LabelConfig {
    pub const DEFAULT_DEVICE_CERTIFICATE: &'static str = "0xE0E1";
    pub const DEFAULT_DEVICE_PRIVATE_KEY: &'static str = "0xE0F1";
    pub const DEFAULT_DEVICE_PUBLIC_KEY: &'static str = "0xF1D1";
    pub const DEFAULT_CODE_VERIFICATION_KEY: &'static str = "0xE0E8";

    pub fn label(&self, kind: ObjectKind) -> &str {
        match kind {
            ObjectKind::DeviceCertificate => &self.device_certificate,
            ObjectKind::DevicePublicKey => &self.device_public_key,
            ObjectKind::DevicePrivateKey => &self.device_private_key,
            ObjectKind::CodeVerificationKey => &self.code_verification_key,
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            device_certificate: Self::DEFAULT_DEVICE_CERTIFICATE.to_string(),
            device_public_key: Self::DEFAULT_DEVICE_PUBLIC_KEY.to_string(),
            device_private_key: Self::DEFAULT_DEVICE_PRIVATE_KEY.to_string(),
            code_verification_key: Self::DEFAULT_CODE_VERIFICATION_KEY.to_string(),
        }
    }
}

/// One row of the label table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    pub kind: ObjectKind,
    pub label: Vec<u8>,
    pub location: Result<Location, LocationError>,
}

impl LabelEntry {
    pub fn handle(&self) -> ObjectHandle {
        self.kind.handle()
    }

    pub fn capability(&self) -> Capability {
        self.kind.capability()
    }
}

/// Immutable label -> location -> handle mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    entries: [LabelEntry; 4],
}

impl LabelTable {
    pub fn new(config: &LabelConfig) -> Result<Self, LabelError> {
        for kind in ObjectKind::ALL {
            if config.label(kind).is_empty() {
                return Err(LabelError::Empty { kind });
            }
        }
        for (i, a) in ObjectKind::ALL.iter().enumerate() {
            for b in &ObjectKind::ALL[i + 1..] {
                if config.label(*a) == config.label(*b) {
                    return Err(LabelError::Duplicate {
                        label: config.label(*a).to_string(),
                        first: *a,
                        second: *b,
                    });
                }
            }
        }
        Ok(Self::build(config))
    }

    fn build(config: &LabelConfig) -> Self {
        let entry = |kind: ObjectKind| {
            let label = config.label(kind).as_bytes().to_vec();
            let location = Location::parse_label(&label);
            LabelEntry {
                kind,
                label,
                location,
            }
        };
        Self {
            entries: ObjectKind::ALL.map(entry),
        }
    }

    /// Exact byte comparison against the configured labels
    pub fn lookup(&self, label: &[u8]) -> Option<&LabelEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    pub fn entry(&self, kind: ObjectKind) -> &LabelEntry {
        &self.entries[kind.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries.iter()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::build(&LabelConfig::default())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("label for {kind:?} is empty")]
    Empty { kind: ObjectKind },

    #[error("label {label:?} is configured for both {first:?} and {second:?}")]
    Duplicate {
        label: String,
        first: ObjectKind,
        second: ObjectKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_handle_round_trip() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::from_handle(kind.handle()), Some(kind));
            assert!(kind.handle().is_valid());
        }
        assert_eq!(ObjectKind::from_handle(ObjectHandle::Invalid), None);
    }

    #[test]
    fn test_only_private_key_is_unsupported() {
        assert_eq!(
            ObjectKind::DevicePrivateKey.capability(),
            Capability::Unsupported
        );
        assert_eq!(
            ObjectKind::DeviceCertificate.capability(),
            Capability::Writable
        );
        assert_eq!(
            ObjectKind::CodeVerificationKey.capability(),
            Capability::Writable
        );
    }

    #[test]
    fn test_default_table_locations() {
        let table = LabelTable::default();
        let location = |kind| table.entry(kind).location.unwrap().get();
        assert_eq!(location(ObjectKind::DeviceCertificate), 0xE0E1);
        assert_eq!(location(ObjectKind::DevicePublicKey), 0xF1D1);
        assert_eq!(location(ObjectKind::DevicePrivateKey), 0xE0F1);
        assert_eq!(location(ObjectKind::CodeVerificationKey), 0xE0E8);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = LabelTable::default();
        assert_eq!(
            table.lookup(b"0xE0E1").map(|e| e.kind),
            Some(ObjectKind::DeviceCertificate)
        );
        assert!(table.lookup(b"0xe0e1").is_none());
        assert!(table.lookup(b"0xE0E1\0").is_none());
        assert!(table.lookup(b"0xE0E").is_none());
        assert!(table.lookup(b"").is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_labels() {
        let config = LabelConfig {
            device_public_key: LabelConfig::DEFAULT_DEVICE_CERTIFICATE.to_string(),
            ..LabelConfig::default()
        };
        assert!(matches!(
            LabelTable::new(&config).unwrap_err(),
            LabelError::Duplicate {
                first: ObjectKind::DeviceCertificate,
                second: ObjectKind::DevicePublicKey,
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_empty_label() {
        let config = LabelConfig {
            code_verification_key: String::new(),
            ..LabelConfig::default()
        };
        assert_eq!(
            LabelTable::new(&config).unwrap_err(),
            LabelError::Empty {
                kind: ObjectKind::CodeVerificationKey
            }
        );
    }

    #[test]
    fn test_unparseable_label_is_kept_with_location_error() {
        let config = LabelConfig {
            device_certificate: "0x0000".to_string(),
            ..LabelConfig::default()
        };
        let table = LabelTable::new(&config).unwrap();
        let entry = table.entry(ObjectKind::DeviceCertificate);
        assert_eq!(entry.location, Err(LocationError::Zero));
        assert_eq!(entry.handle(), ObjectHandle::DeviceCertificate);
    }
}
