// rc522/src/poller.rs

//! Polling loop: initialize once, then identify cards at a fixed interval
//! and print each verified UID.

use std::io::Write;
use std::thread;
use std::time::Duration;

use log::{debug, error, info};

use crate::config::{PollConfig, ProtocolConfig, ReaderConfig};
use crate::error::ErrorKind;
use crate::pcd::{Initialized, Pcd, Uninitialized};
use crate::picc::Verified;
use crate::types::Uid;
use crate::utils::CancellationToken;
use crate::Result;

const SLEEP_SLICE_MS: u64 = 10;

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    NoCard,
    Reported(Verified),
    /// The cycle was abandoned; the next cycle starts from scratch.
    Skipped(ErrorKind),
}

/// Counters returned when [`Poller::run`] is cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub cycles: u64,
    pub reported: u64,
    pub skipped: u64,
}

/// The two report lines written for a verified card.
///
/// ```
/// use rc522::poller::report_lines;
/// use rc522::Uid;
/// use std::convert::TryFrom;
///
/// let uid = Uid::try_from(&[0x04, 0x1A, 0x2B, 0x3C][..]).unwrap();
/// assert_eq!(
///     report_lines(&uid, "MIFARE Classic"),
///     "UID: 041A2B3C\nType: MIFARE Classic\n"
/// );
/// ```
pub fn report_lines(uid: &Uid, label: &str) -> String {
    format!("UID: {}\nType: {}\n", uid.to_hex(), label)
}

pub struct Poller {
    pcd: Pcd<Initialized>,
    protocol: ProtocolConfig,
    poll: PollConfig,
}

impl Poller {
    /// Validate the timing and protocol sections of `config` and run the
    /// reader initialization. The bus section belongs to whoever built the
    /// transport and is not checked here. Failure is fatal: the reader is
    /// unusable and no polling starts.
    pub fn start(pcd: Pcd<Uninitialized>, config: &ReaderConfig) -> Result<Self> {
        config.timing.validate()?;
        config.protocol.validate()?;
        let pcd = match pcd.with_timing(config.timing.clone()).initialize() {
            Ok(pcd) => pcd,
            Err(e) => {
                error!("reader initialization failed: {}", e);
                return Err(e);
            }
        };
        Ok(Self {
            pcd,
            protocol: config.protocol.clone(),
            poll: config.poll.clone(),
        })
    }

    pub fn pcd_mut(&mut self) -> &mut Pcd<Initialized> {
        &mut self.pcd
    }

    pub fn into_pcd(self) -> Pcd<Initialized> {
        self.pcd
    }

    /// One identification attempt. Recoverable failures are logged and
    /// reported as [`PollOutcome::Skipped`]; only fatal ones are returned.
    pub fn poll_once<W: Write>(&mut self, out: &mut W) -> Result<PollOutcome> {
        let mut session = self.pcd.identification(&self.protocol)?;
        let verified = match session.identify() {
            Ok(Some(v)) => v,
            Ok(None) => return Ok(PollOutcome::NoCard),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!("poll cycle skipped: {}", e);
                return Ok(PollOutcome::Skipped(e.kind()));
            }
        };

        out.write_all(report_lines(&verified.uid, &self.poll.card_label).as_bytes())?;
        out.flush()?;
        info!("card {} ({})", verified.uid, verified.card_type);

        if self.poll.halt_after_report {
            if let Err(e) = session.halt() {
                debug!("HLTA after report failed: {}", e);
            }
        }
        Ok(PollOutcome::Reported(verified))
    }

    /// Poll until `cancel` fires. Sleeps the interval after each cycle, or
    /// the cooldown after a report.
    pub fn run<W: Write>(&mut self, out: &mut W, cancel: &CancellationToken) -> Result<PollStats> {
        let mut stats = PollStats::default();
        info!(
            "polling every {} ms (cooldown {} ms)",
            self.poll.interval_ms, self.poll.cooldown_ms
        );
        while !cancel.is_cancelled() {
            stats.cycles += 1;
            let pause = match self.poll_once(out)? {
                PollOutcome::Reported(_) => {
                    stats.reported += 1;
                    self.poll.cooldown_ms
                }
                PollOutcome::Skipped(_) => {
                    stats.skipped += 1;
                    self.poll.interval_ms
                }
                PollOutcome::NoCard => self.poll.interval_ms,
            };
            sleep_cancellable(pause, cancel);
        }
        info!(
            "polling stopped after {} cycles ({} reported, {} skipped)",
            stats.cycles, stats.reported, stats.skipped
        );
        Ok(stats)
    }
}

fn sleep_cancellable(total_ms: u64, cancel: &CancellationToken) {
    let mut left = total_ms;
    while left > 0 && !cancel.is_cancelled() {
        let step = left.min(SLEEP_SLICE_MS);
        thread::sleep(Duration::from_millis(step));
        left -= step;
    }
}
