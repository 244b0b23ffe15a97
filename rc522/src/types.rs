// rc522/src/types.rs

use std::convert::TryFrom;
use std::fmt;

use crate::constants::SAK_CASCADE_BIT;
use crate::Error;

/// ATQA - Answer To Request (2 バイト, LSB first on the air)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atqa([u8; 2]);

impl Atqa {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// UID size announced in bits 7..6 of the first byte. `None` for the
    /// reserved code `11`.
    pub fn uid_size(&self) -> Option<UidSize> {
        match (self.0[0] >> 6) & 0x03 {
            0b00 => Some(UidSize::Single),
            0b01 => Some(UidSize::Double),
            0b10 => Some(UidSize::Triple),
            _ => None,
        }
    }

    /// Bit frame anticollision flags (bits 4..0 of the first byte).
    pub fn anticollision_bits(&self) -> u8 {
        self.0[0] & 0x1F
    }
}

impl TryFrom<&[u8]> for Atqa {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                actual: bytes.len(),
            });
        }
        Ok(Self([bytes[0], bytes[1]]))
    }
}

/// SAK - Select Acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sak(u8);

impl Sak {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Bit 3 set: the UID continues at the next cascade level.
    pub fn is_uid_incomplete(&self) -> bool {
        self.0 & SAK_CASCADE_BIT != 0
    }
}

/// UID length class. Stored as a tag instead of a fixed-size array so
/// single, double and triple size UIDs share one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UidSize {
    /// 4 bytes, one cascade level
    Single,
    /// 7 bytes, two cascade levels
    Double,
    /// 10 bytes, three cascade levels
    Triple,
}

impl UidSize {
    pub fn len(self) -> usize {
        match self {
            UidSize::Single => 4,
            UidSize::Double => 7,
            UidSize::Triple => 10,
        }
    }

    pub fn cascade_levels(self) -> u8 {
        match self {
            UidSize::Single => 1,
            UidSize::Double => 2,
            UidSize::Triple => 3,
        }
    }

    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            4 => Some(UidSize::Single),
            7 => Some(UidSize::Double),
            10 => Some(UidSize::Triple),
            _ => None,
        }
    }
}

/// Card identifier (4, 7 or 10 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    bytes: [u8; 10],
    size: UidSize,
}

impl Uid {
    pub fn size(&self) -> UidSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size.len()]
    }

    /// Uppercase hex without separators, e.g. `041A2B3C`.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let size = UidSize::from_len(bytes.len()).ok_or(Error::InvalidLength {
            expected: 4,
            actual: bytes.len(),
        })?;
        let mut arr = [0u8; 10];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self { bytes: arr, size })
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid({})", crate::utils::bytes_to_hex_spaced(self.as_bytes()))
    }
}
