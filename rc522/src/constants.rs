// rc522/src/constants.rs
//! ISO/IEC 14443-3 Type A and MFRC522 constants used across the crate

/// REQA short frame (7 bits)
pub const PICC_REQA: u8 = 0x26;

/// WUPA short frame (7 bits)
pub const PICC_WUPA: u8 = 0x52;

/// SEL codes for cascade levels 1..=3
pub const PICC_SEL_CL1: u8 = 0x93;
pub const PICC_SEL_CL2: u8 = 0x95;
pub const PICC_SEL_CL3: u8 = 0x97;

/// HLTA command byte (followed by 0x00 and CRC_A)
pub const PICC_HLTA: u8 = 0x50;

/// Cascade tag prefixed to a level's UID bytes when the UID continues
pub const CASCADE_TAG: u8 = 0x88;

/// SAK bit: UID not complete, another cascade level follows
pub const SAK_CASCADE_BIT: u8 = 0x04;

/// SAK bit: PICC compliant with ISO/IEC 14443-4
pub const SAK_ISO14443_4_BIT: u8 = 0x20;

/// NVB for a full SELECT (7 bytes: SEL, NVB, 4 UID bytes, BCC)
pub const NVB_SELECT: u8 = 0x70;

/// Bits in one cascade level (4 UID/CT bytes); BCC is not part of the bit walk
pub const CASCADE_LEVEL_BITS: u8 = 32;

/// CRC_A preset value (ISO/IEC 14443-3 Annex B)
pub const CRC_A_PRESET: u16 = 0x6363;

/// Short frames (REQA/WUPA) carry 7 bits
pub const SHORT_FRAME_BITS: u8 = 7;

/// Reader chip timer runs at 13.56 MHz / (2 * 0xA9 + 1) ≈ 40 kHz, i.e. 40 ticks per ms
pub const TIMER_TICKS_PER_MS: u32 = 40;

/// Known VersionReg values: 0x88 FM17522 clone, 0x90 v0.0, 0x91 v1.0, 0x92 v2.0
pub const KNOWN_VERSIONS: [u8; 4] = [0x88, 0x90, 0x91, 0x92];

/// Depth of the reader FIFO
pub const FIFO_SIZE: usize = 64;
