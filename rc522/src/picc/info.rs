// rc522/src/picc/info.rs

use derive_more::Display;

use crate::types::{Sak, Uid};

/// Card family derived from the final SAK (NXP AN10833).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CardType {
    #[display(fmt = "UID not complete")]
    NotComplete,
    #[display(fmt = "MIFARE Mini")]
    MifareMini,
    #[display(fmt = "MIFARE Classic 1K")]
    MifareClassic1K,
    #[display(fmt = "MIFARE Classic 4K")]
    MifareClassic4K,
    #[display(fmt = "MIFARE Ultralight")]
    MifareUltralight,
    #[display(fmt = "MIFARE Plus")]
    MifarePlus,
    #[display(fmt = "MIFARE TNP3XXX")]
    Tnp3xxx,
    #[display(fmt = "ISO/IEC 14443-4")]
    Iso14443_4,
    #[display(fmt = "ISO/IEC 18092 (NFC)")]
    Iso18092,
    #[display(fmt = "unknown (SAK {:#04x})", _0)]
    Unknown(u8),
}

impl CardType {
    pub fn from_sak(sak: Sak) -> Self {
        // bit 7 is reserved for future use
        match sak.as_u8() & 0x7F {
            0x04 => CardType::NotComplete,
            0x09 => CardType::MifareMini,
            0x08 => CardType::MifareClassic1K,
            0x18 => CardType::MifareClassic4K,
            0x00 => CardType::MifareUltralight,
            0x10 | 0x11 => CardType::MifarePlus,
            0x01 => CardType::Tnp3xxx,
            0x20 => CardType::Iso14443_4,
            0x40 => CardType::Iso18092,
            other => CardType::Unknown(other),
        }
    }

    pub fn is_mifare_classic(&self) -> bool {
        matches!(
            self,
            CardType::MifareMini | CardType::MifareClassic1K | CardType::MifareClassic4K
        )
    }
}

/// Outcome of a completed identification: the card is selected (ACTIVE)
/// and its UID passed BCC and CRC_A checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verified {
    pub uid: Uid,
    pub sak: Sak,
    pub card_type: CardType,
}

impl Verified {
    pub fn new(uid: Uid, sak: Sak) -> Self {
        Self {
            uid,
            sak,
            card_type: CardType::from_sak(sak),
        }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }
}
