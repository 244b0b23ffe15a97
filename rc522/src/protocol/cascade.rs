// rc522/src/protocol/cascade.rs

//! Cascade levels and the split of a UID into per-level 4-byte fields.
//!
//! | UID size | CL1            | CL2            | CL3      |
//! |----------|----------------|----------------|----------|
//! | 4 bytes  | u0 u1 u2 u3    |                |          |
//! | 7 bytes  | CT u0 u1 u2    | u3 u4 u5 u6    |          |
//! | 10 bytes | CT u0 u1 u2    | CT u3 u4 u5    | u6..u9   |

use crate::constants::{CASCADE_TAG, PICC_SEL_CL1, PICC_SEL_CL2, PICC_SEL_CL3};
use crate::protocol::checksum::bcc;
use crate::types::{Uid, UidSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CascadeLevel {
    One,
    Two,
    Three,
}

impl CascadeLevel {
    pub const ALL: [CascadeLevel; 3] = [CascadeLevel::One, CascadeLevel::Two, CascadeLevel::Three];

    pub fn sel_code(self) -> u8 {
        match self {
            CascadeLevel::One => PICC_SEL_CL1,
            CascadeLevel::Two => PICC_SEL_CL2,
            CascadeLevel::Three => PICC_SEL_CL3,
        }
    }

    pub fn from_sel_code(code: u8) -> Option<Self> {
        match code {
            PICC_SEL_CL1 => Some(CascadeLevel::One),
            PICC_SEL_CL2 => Some(CascadeLevel::Two),
            PICC_SEL_CL3 => Some(CascadeLevel::Three),
            _ => None,
        }
    }

    /// 1-based level number, as used in log and error messages.
    pub fn number(self) -> u8 {
        match self {
            CascadeLevel::One => 1,
            CascadeLevel::Two => 2,
            CascadeLevel::Three => 3,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            CascadeLevel::One => Some(CascadeLevel::Two),
            CascadeLevel::Two => Some(CascadeLevel::Three),
            CascadeLevel::Three => None,
        }
    }

    /// Last level needed for a UID of `size`.
    pub fn last_for(size: UidSize) -> Self {
        match size {
            UidSize::Single => CascadeLevel::One,
            UidSize::Double => CascadeLevel::Two,
            UidSize::Triple => CascadeLevel::Three,
        }
    }
}

/// The four bytes a card presents at `level`, or `None` if the UID has no such level.
pub fn level_bytes(uid: &[u8], level: CascadeLevel) -> Option<[u8; 4]> {
    let size = UidSize::from_len(uid.len())?;
    if level > CascadeLevel::last_for(size) {
        return None;
    }
    let last = level == CascadeLevel::last_for(size);
    let start = match level {
        CascadeLevel::One => 0,
        CascadeLevel::Two => 3,
        CascadeLevel::Three => 6,
    };
    Some(if last {
        [uid[start], uid[start + 1], uid[start + 2], uid[start + 3]]
    } else {
        [CASCADE_TAG, uid[start], uid[start + 1], uid[start + 2]]
    })
}

/// Level bytes followed by their BCC: the 40-bit field walked by anticollision.
pub fn level_field(uid: &[u8], level: CascadeLevel) -> Option<[u8; 5]> {
    let b = level_bytes(uid, level)?;
    Some([b[0], b[1], b[2], b[3], bcc(&b)])
}

/// Level bytes of the final cascade level of an already resolved UID.
pub fn final_level_bytes(uid: &Uid) -> [u8; 4] {
    let bytes = uid.as_bytes();
    let start = bytes.len() - 4;
    [bytes[start], bytes[start + 1], bytes[start + 2], bytes[start + 3]]
}

/// UID bytes contributed by a resolved level (drops the cascade tag).
pub fn uid_part(level: &[u8; 4]) -> &[u8] {
    if level[0] == CASCADE_TAG {
        &level[1..]
    } else {
        &level[..]
    }
}
