//! The toss trigger and its delayed one-shots.
//!
//! A toss temporarily boosts the intensity signal, reveals the submitted
//! text after a short delay, and clears the boost after a longer one. The
//! two delays are tick-denominated one-shot timers keyed to a toss epoch;
//! a timer only acts if the epoch it was scheduled under is still current.
//! Repeated triggers while a toss is in flight are rejected outright - they
//! never reset or cancel the pending timers.

/// Result of a toss trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossOutcome {
    /// The toss was accepted; the boost window has started.
    Accepted,
    /// The text was empty or whitespace-only. Nothing changed.
    EmptyText,
    /// A toss is already in flight. Nothing changed.
    AlreadyActive,
}

impl TossOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, TossOutcome::Accepted)
    }
}

/// A tick-deadline bound to the epoch it was scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OneShot {
    epoch: u64,
    due: u64,
}

/// State machine for the toss action.
#[derive(Debug, Clone, Default)]
pub struct TossState {
    epoch: u64,
    active: bool,
    pending_text: Option<String>,
    revealed: Option<String>,
    reveal: Option<OneShot>,
    clear: Option<OneShot>,
}

impl TossState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to start a toss at tick `now`.
    ///
    /// On acceptance the epoch advances, the boost flag is set, and the
    /// reveal/clear one-shots are scheduled `reveal_delay` and `clear_delay`
    /// ticks out. Rejections leave all state untouched.
    pub fn trigger(
        &mut self,
        text: &str,
        now: u64,
        reveal_delay: u64,
        clear_delay: u64,
    ) -> TossOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TossOutcome::EmptyText;
        }
        if self.active {
            return TossOutcome::AlreadyActive;
        }

        self.epoch += 1;
        self.active = true;
        self.revealed = None;
        self.pending_text = Some(trimmed.to_owned());
        self.reveal = Some(OneShot {
            epoch: self.epoch,
            due: now + reveal_delay,
        });
        self.clear = Some(OneShot {
            epoch: self.epoch,
            due: now + clear_delay,
        });
        TossOutcome::Accepted
    }

    /// Fire any one-shots that are due at tick `now`.
    ///
    /// Stale one-shots (scheduled under a superseded epoch) are discarded
    /// without acting.
    pub fn advance(&mut self, now: u64) {
        if let Some(shot) = self.reveal {
            if now >= shot.due {
                if shot.epoch == self.epoch {
                    self.revealed = self.pending_text.take();
                }
                self.reveal = None;
            }
        }
        if let Some(shot) = self.clear {
            if now >= shot.due {
                if shot.epoch == self.epoch {
                    self.active = false;
                }
                self.clear = None;
            }
        }
    }

    /// Whether the intensity boost is currently applied.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Text revealed by the last toss, if the reveal one-shot has fired.
    pub fn revealed(&self) -> Option<&str> {
        self.revealed.as_deref()
    }

    /// Number of tosses accepted so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[cfg(test)]
    fn reveal_due(&self) -> Option<u64> {
        self.reveal.map(|s| s.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVEAL: u64 = 108;
    const CLEAR: u64 = 480;

    #[test]
    fn test_accepts_once_then_rejects_while_active() {
        let mut toss = TossState::new();
        assert_eq!(toss.trigger("make it so", 0, REVEAL, CLEAR), TossOutcome::Accepted);
        assert!(toss.is_active());
        assert_eq!(toss.epoch(), 1);

        assert_eq!(toss.trigger("again", 5, REVEAL, CLEAR), TossOutcome::AlreadyActive);
        assert_eq!(toss.epoch(), 1);
    }

    #[test]
    fn test_rejected_retrigger_keeps_original_deadlines() {
        let mut toss = TossState::new();
        toss.trigger("wish", 0, REVEAL, CLEAR);
        let due = toss.reveal_due();
        toss.trigger("other wish", 50, REVEAL, CLEAR);
        assert_eq!(toss.reveal_due(), due);

        toss.advance(REVEAL);
        assert_eq!(toss.revealed(), Some("wish"));
    }

    #[test]
    fn test_whitespace_only_is_rejected_without_state_change() {
        let mut toss = TossState::new();
        assert_eq!(toss.trigger("   ", 0, REVEAL, CLEAR), TossOutcome::EmptyText);
        assert!(!toss.is_active());
        toss.advance(CLEAR + 1);
        assert_eq!(toss.revealed(), None);
        assert_eq!(toss.epoch(), 0);
    }

    #[test]
    fn test_reveal_fires_before_clear() {
        let mut toss = TossState::new();
        toss.trigger("wish", 0, REVEAL, CLEAR);

        toss.advance(REVEAL - 1);
        assert_eq!(toss.revealed(), None);
        assert!(toss.is_active());

        toss.advance(REVEAL);
        assert_eq!(toss.revealed(), Some("wish"));
        assert!(toss.is_active());

        toss.advance(CLEAR);
        assert!(!toss.is_active());
        // The revealed text outlives the boost window.
        assert_eq!(toss.revealed(), Some("wish"));
    }

    #[test]
    fn test_new_toss_after_clear_supersedes_reveal() {
        let mut toss = TossState::new();
        toss.trigger("first", 0, REVEAL, CLEAR);
        toss.advance(CLEAR);
        assert!(!toss.is_active());

        assert!(toss.trigger("second", CLEAR, REVEAL, CLEAR).accepted());
        assert_eq!(toss.epoch(), 2);
        assert_eq!(toss.revealed(), None);
        toss.advance(CLEAR + REVEAL);
        assert_eq!(toss.revealed(), Some("second"));
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut toss = TossState::new();
        toss.trigger("  starlight  ", 0, REVEAL, CLEAR);
        toss.advance(REVEAL);
        assert_eq!(toss.revealed(), Some("starlight"));
    }
}
