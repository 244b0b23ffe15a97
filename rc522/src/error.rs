// rc522/src/error.rs

use thiserror::Error;

use crate::pcd::Register;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("bus error: {0}")]
    Bus(String),

    #[error("operation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("no response from card (reader timer expired)")]
    NoResponse,

    #[error("communication error: ErrorReg={error_reg:#04x}")]
    Communication { error_reg: u8 },

    #[error("invalid response length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("BCC mismatch: expected {expected:#04x}, got {actual:#04x}")]
    BccMismatch { expected: u8, actual: u8 },

    #[error("UID size mismatch: ATQA announced {announced} bytes, resolved {resolved}")]
    UidSizeMismatch { announced: usize, resolved: usize },

    #[error("anticollision did not converge within {rounds} rounds")]
    CollisionLimit { rounds: usize },

    #[error("collision could not be resolved after {known_bits} known bits")]
    CollisionUnresolvable { known_bits: u8 },

    #[error("CRC_A mismatch: expected {expected:02x?}, got {actual:02x?}")]
    CrcMismatch { expected: [u8; 2], actual: [u8; 2] },

    #[error("unexpected SAK {sak:#04x} at cascade level {level}")]
    UnexpectedSak { sak: u8, level: u8 },

    #[error("init read-back mismatch on {register:?}: wrote {wrote:#04x}, read {read:#04x}")]
    InitReadback {
        register: Register,
        wrote: u8,
        read: u8,
    },

    /// Any other failure while configuring the reader, e.g. a bus fault.
    #[error("reader initialization failed: {source}")]
    Init {
        #[source]
        source: Box<Error>,
    },

    #[error("soft reset did not complete")]
    ResetTimeout,

    #[error("no MFRC522 detected (VersionReg={version:#04x})")]
    NoDevice { version: u8 },

    #[error("invalid session state: expected {expected}, was {actual}")]
    InvalidState {
        expected: &'static str,
        actual: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed, absent or inconsistent response on the bus.
    Bus,
    /// Anticollision could not settle on one identifier.
    Collision,
    /// Final select failed verification.
    Select,
    /// Reader configuration failed; the reader cannot be trusted.
    Init,
    /// API misuse or bad configuration.
    Usage,
    /// Writing a report to the output sink failed.
    Output,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Bus(_)
            | Error::Timeout { .. }
            | Error::NoResponse
            | Error::Communication { .. }
            | Error::InvalidLength { .. }
            | Error::FrameFormat(_)
            | Error::BccMismatch { .. }
            | Error::UidSizeMismatch { .. } => ErrorKind::Bus,
            Error::CollisionLimit { .. } | Error::CollisionUnresolvable { .. } => {
                ErrorKind::Collision
            }
            Error::CrcMismatch { .. } | Error::UnexpectedSak { .. } => ErrorKind::Select,
            Error::InitReadback { .. }
            | Error::Init { .. }
            | Error::ResetTimeout
            | Error::NoDevice { .. } => ErrorKind::Init,
            Error::InvalidState { .. } | Error::Config(_) => ErrorKind::Usage,
            Error::Io(_) => ErrorKind::Output,
        }
    }

    /// Errors that stop the presentation loop: the reader failed to
    /// initialize, or the report could not be written.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Init | ErrorKind::Output)
    }

    /// Classify a failure raised while configuring the reader as `Init`,
    /// keeping errors that already are.
    pub(crate) fn into_init(self) -> Self {
        match self.kind() {
            ErrorKind::Init => self,
            _ => Error::Init {
                source: Box::new(self),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
