// rc522/src/picc/session.rs

//! One identification session: REQA, anticollision over every cascade
//! level, SELECT. Any failure drops the session back to `Idle` and no
//! partially resolved identifier leaves this module.

use std::convert::TryFrom;

use log::{debug, trace};

use crate::config::ProtocolConfig;
use crate::constants::CASCADE_TAG;
use crate::pcd::{Initialized, Pcd};
use crate::picc::info::Verified;
use crate::protocol::anticollision::{CollisionState, Progress};
use crate::protocol::cascade::{self, CascadeLevel};
use crate::protocol::commands::PiccCommand;
use crate::protocol::responses::{decode_atqa, decode_sak};
use crate::types::{Atqa, Sak, Uid};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Requesting,
    PresentDetected,
    AntiCollision,
    BitsResolved,
    Selecting,
    /// Terminal: the identifier is verified.
    Selected,
}

/// A card answered REQA/WUPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPresent {
    pub atqa: Atqa,
    /// Several cards answered with different ATQA bits.
    pub collided: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    NoCard,
    Present(CardPresent),
}

/// Identifier fixed by the anticollision loop, not yet selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardIdentifier {
    uid: Uid,
    rounds: usize,
}

impl CardIdentifier {
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Anticollision frames exchanged over all cascade levels.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn final_level(&self) -> CascadeLevel {
        CascadeLevel::last_for(self.uid.size())
    }
}

/// Identification session bound to an initialized reader.
pub struct CardIdentification<'a> {
    pcd: &'a mut Pcd<Initialized>,
    config: ProtocolConfig,
    state: SessionState,
    present: Option<CardPresent>,
    pending: Option<Uid>,
}

impl<'a> CardIdentification<'a> {
    pub fn new(pcd: &'a mut Pcd<Initialized>, config: ProtocolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pcd,
            config,
            state: SessionState::Idle,
            present: None,
            pending: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Send REQA. Absence of a card is `Detection::NoCard`, not an error.
    /// Always starts a fresh session.
    pub fn detect(&mut self) -> Result<Detection> {
        self.request(PiccCommand::ReqA)
    }

    /// Like [`CardIdentification::detect`] but with WUPA, which also wakes
    /// halted cards.
    pub fn wake(&mut self) -> Result<Detection> {
        self.request(PiccCommand::WupA)
    }

    /// Run the anticollision cascade and return the identifier it settles on.
    pub fn resolve_identifier(&mut self) -> Result<CardIdentifier> {
        self.expect(SessionState::PresentDetected, "PresentDetected")?;
        self.enter(SessionState::AntiCollision);
        match self.run_cascade() {
            Ok(id) => {
                self.pending = Some(id.uid);
                self.enter(SessionState::BitsResolved);
                Ok(id)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// SELECT the final cascade level and verify the SAK's CRC_A.
    pub fn select(&mut self, identifier: &CardIdentifier) -> Result<Verified> {
        self.expect(SessionState::BitsResolved, "BitsResolved")?;
        if self.pending != Some(identifier.uid) {
            let err = Error::InvalidState {
                expected: "identifier resolved by this session",
                actual: identifier.uid.to_hex(),
            };
            return Err(self.fail(err));
        }
        self.enter(SessionState::Selecting);

        let level = identifier.final_level();
        let bytes = cascade::final_level_bytes(&identifier.uid);
        let sak = match self.select_level(level, &bytes) {
            Ok(sak) => sak,
            Err(e) => return Err(self.fail(e)),
        };
        if sak.is_uid_incomplete() {
            let err = Error::UnexpectedSak {
                sak: sak.as_u8(),
                level: level.number(),
            };
            return Err(self.fail(err));
        }

        let verified = Verified::new(identifier.uid, sak);
        self.pending = None;
        self.enter(SessionState::Selected);
        debug!("selected {} ({})", verified.uid, verified.card_type);
        Ok(verified)
    }

    /// Send HLTA to the selected card. The card must stay silent; silence
    /// is success. The session returns to `Idle` either way.
    pub fn halt(&mut self) -> Result<()> {
        let result = match self.pcd.execute(&PiccCommand::HltA) {
            Err(Error::NoResponse) => Ok(()),
            Ok(rx) => Err(Error::FrameFormat(format!(
                "card answered HLTA with {} bytes",
                rx.data.len()
            ))),
            Err(e) => Err(e),
        };
        self.reset();
        result
    }

    /// detect, resolve_identifier and select in one call.
    pub fn identify(&mut self) -> Result<Option<Verified>> {
        match self.detect()? {
            Detection::NoCard => Ok(None),
            Detection::Present(_) => {
                let id = self.resolve_identifier()?;
                self.select(&id).map(Some)
            }
        }
    }

    fn request(&mut self, cmd: PiccCommand) -> Result<Detection> {
        self.reset();
        self.enter(SessionState::Requesting);

        let rx = match self.pcd.execute(&cmd) {
            Ok(rx) => rx,
            Err(Error::NoResponse) => {
                self.enter(SessionState::Idle);
                return Ok(Detection::NoCard);
            }
            Err(e) => return Err(self.fail(e)),
        };

        let present = if rx.collision.is_some() {
            let mut bytes = [0u8; 2];
            for (dst, src) in bytes.iter_mut().zip(rx.data.iter()) {
                *dst = *src;
            }
            CardPresent {
                atqa: Atqa::from_bytes(bytes),
                collided: true,
            }
        } else {
            match decode_atqa(&rx.data, rx.valid_bits) {
                Ok(atqa) => CardPresent {
                    atqa,
                    collided: false,
                },
                Err(e) => return Err(self.fail(e)),
            }
        };

        debug!(
            "{} answered: ATQA {:02x?}{}",
            cmd.name(),
            present.atqa.as_bytes(),
            if present.collided { " (collided)" } else { "" }
        );
        self.present = Some(present);
        self.enter(SessionState::PresentDetected);
        Ok(Detection::Present(present))
    }

    fn run_cascade(&mut self) -> Result<CardIdentifier> {
        let mut uid_bytes: Vec<u8> = Vec::with_capacity(10);
        let mut rounds = 0;
        let mut level = CascadeLevel::One;

        loop {
            let (bytes, used) = self.resolve_level(level)?;
            rounds += used;
            if bytes[0] != CASCADE_TAG {
                uid_bytes.extend_from_slice(cascade::uid_part(&bytes));
                break;
            }

            let next = level.next().ok_or_else(|| {
                Error::FrameFormat("cascade tag at the last cascade level".to_string())
            })?;
            let sak = self.select_level(level, &bytes)?;
            if !sak.is_uid_incomplete() {
                return Err(Error::UnexpectedSak {
                    sak: sak.as_u8(),
                    level: level.number(),
                });
            }
            uid_bytes.extend_from_slice(cascade::uid_part(&bytes));
            level = next;
        }

        let uid = Uid::try_from(&uid_bytes[..])?;
        self.check_uid_size(&uid)?;
        Ok(CardIdentifier { uid, rounds })
    }

    fn resolve_level(&mut self, level: CascadeLevel) -> Result<([u8; 4], usize)> {
        let mut st = CollisionState::new(level);
        while st.rounds() < self.config.max_rounds {
            let rx = self.pcd.execute(&st.command())?;
            match st.merge(&rx.data, rx.valid_bits, rx.collision, self.config.tie_break)? {
                Progress::Complete(bytes) => {
                    trace!(
                        "cascade level {} resolved after {} rounds",
                        level.number(),
                        st.rounds()
                    );
                    return Ok((bytes, st.rounds()));
                }
                Progress::Continue { known_bits } => {
                    debug!(
                        "collision at cascade level {}: {} bits known",
                        level.number(),
                        known_bits
                    );
                }
            }
        }
        Err(Error::CollisionLimit {
            rounds: st.rounds(),
        })
    }

    fn select_level(&mut self, level: CascadeLevel, bytes: &[u8; 4]) -> Result<Sak> {
        let rx = self.pcd.execute(&PiccCommand::Select {
            level,
            uid_cl: *bytes,
        })?;
        if rx.collision.is_some() {
            return Err(Error::FrameFormat("collision in SELECT answer".to_string()));
        }
        let (sak, crc) = decode_sak(&rx.data, rx.valid_bits)?;
        let expected = self.pcd.calculate_crc(&[sak.as_u8()])?;
        if expected != crc {
            return Err(Error::CrcMismatch {
                expected,
                actual: crc,
            });
        }
        Ok(sak)
    }

    fn check_uid_size(&self, uid: &Uid) -> Result<()> {
        if !self.config.check_uid_size {
            return Ok(());
        }
        let announced = match self.present {
            Some(p) if !p.collided => p.atqa.uid_size(),
            _ => None,
        };
        match announced {
            Some(size) if size != uid.size() => Err(Error::UidSizeMismatch {
                announced: size.len(),
                resolved: uid.len(),
            }),
            _ => Ok(()),
        }
    }

    fn expect(&mut self, state: SessionState, name: &'static str) -> Result<()> {
        if self.state == state {
            return Ok(());
        }
        let err = Error::InvalidState {
            expected: name,
            actual: format!("{:?}", self.state),
        };
        Err(self.fail(err))
    }

    fn enter(&mut self, next: SessionState) {
        trace!("session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn reset(&mut self) {
        self.enter(SessionState::Idle);
        self.present = None;
        self.pending = None;
    }

    fn fail(&mut self, err: Error) -> Error {
        debug!("session aborted in {:?}: {}", self.state, err);
        self.reset();
        err
    }
}
