use std::fmt;

/// Object bytes read back from the secure element
///
/// The caller owns the buffer; dropping it (or handing it to
/// `ObjectStore::release_value`) releases it.
#[derive(Clone, PartialEq, Eq)]
pub struct ObjectValue {
    data: Vec<u8>,
    is_private: bool,
}

impl ObjectValue {
    pub(crate) fn exportable(data: Vec<u8>) -> Self {
        Self {
            data,
            is_private: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Always false: only exportable objects are served
    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for ObjectValue {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue")
            .field("len", &self.data.len())
            .field("is_private", &self.is_private)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exportable_value() {
        let value = ObjectValue::exportable(vec![1, 2, 3]);
        assert_eq!(value.as_bytes(), &[1, 2, 3]);
        assert_eq!(value.len(), 3);
        assert!(!value.is_private());
        assert_eq!(value.into_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_debug_hides_contents() {
        let value = ObjectValue::exportable(vec![0xAB; 4]);
        let debug_str = format!("{:?}", value);
        assert!(debug_str.contains("len: 4"));
        assert!(!debug_str.contains("171"));
    }
}
