use std::fmt;
use std::num::NonZeroU16;
use thiserror::Error;

/// Address of a data object inside the secure element
///
/// Location zero is reserved as "unresolvable" and cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(NonZeroU16);

impl Location {
    pub fn new(raw: u16) -> Result<Self, LocationError> {
        NonZeroU16::new(raw).map(Self).ok_or(LocationError::Zero)
    }

    /// Parse a label's textual form as a base-16 address
    ///
    /// Leading ASCII whitespace and an optional `0x`/`0X` prefix are skipped,
    /// then hex digits are consumed up to the first non-hex byte. Anything
    /// after the digits is ignored.
    pub fn parse_label(label: &[u8]) -> Result<Self, LocationError> {
        let start = label
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(label.len());
        let mut rest = &label[start..];

        if matches!(rest.first(), Some(b'+') | Some(b'-')) {
            return Err(LocationError::Signed);
        }
        if rest.len() > 2
            && rest[0] == b'0'
            && (rest[1] == b'x' || rest[1] == b'X')
            && rest[2].is_ascii_hexdigit()
        {
            rest = &rest[2..];
        }

        let digits = rest.iter().take_while(|b| b.is_ascii_hexdigit()).count();
        if digits == 0 {
            return Err(LocationError::NoDigits);
        }

        let mut value: u32 = 0;
        for &b in &rest[..digits] {
            let nibble = (b as char).to_digit(16).unwrap_or(0);
            value = value
                .checked_mul(16)
                .and_then(|v| v.checked_add(nibble))
                .filter(|v| *v <= u32::from(u16::MAX))
                .ok_or(LocationError::OutOfRange)?;
        }

        let raw = u16::try_from(value).map_err(|_| LocationError::OutOfRange)?;
        Self::new(raw)
    }

    pub fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.get())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("location 0 is reserved")]
    Zero,

    #[error("label contains no hexadecimal digits")]
    NoDigits,

    #[error("signed location values are not addresses")]
    Signed,

    #[error("location does not fit in 16 bits")]
    OutOfRange,
}
