//! Revert-timer state machine owning the canonical signal state.

use embassy_time::{Duration, Instant};

use crate::signal::{SignalLamps, SignalState};

/// Canonical signal state plus its fail-safe revert deadline.
///
/// State and deadline form one unit and are only ever mutated together, which
/// is what keeps the invariant alive: the deadline is armed exactly when the
/// aspect is not `Red`. The controller never samples the clock itself;
/// callers pass `now`, so a cycle can drain a command first and then check
/// the timeout against the state that command left behind.
pub struct SignalController {
    state: SignalState,
    deadline: Option<Instant>,
    hold: Duration,
}

impl SignalController {
    /// Creates a controller showing `Red` with the timer disarmed.
    ///
    /// `hold` is how long a non-Red aspect survives without a fresh command.
    pub const fn new(hold: Duration) -> Self {
        Self {
            state: SignalState::Red,
            deadline: None,
            hold,
        }
    }

    /// Current canonical aspect.
    pub fn state(&self) -> SignalState {
        self.state
    }

    /// Armed revert deadline; `Some` exactly when the aspect is not `Red`.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Applies a dequeued command, writing through to the lamps on change.
    ///
    /// A command naming the current aspect is a complete no-op: the lamps are
    /// not rewritten and an armed deadline keeps its original expiry. Any
    /// other command moves the aspect, actuates the head, and arms the
    /// deadline to `now + hold` (non-Red) or disarms it (`Red`). Returns
    /// whether the aspect changed.
    pub fn apply<L: SignalLamps>(
        &mut self,
        target: SignalState,
        now: Instant,
        lamps: &mut L,
    ) -> bool {
        if target == self.state {
            return false;
        }
        self.state = target;
        lamps.set(target);
        self.deadline = match target {
            SignalState::Red => None,
            SignalState::Yellow | SignalState::Green => Some(now + self.hold),
        };
        true
    }

    /// Fail-safe timeout check, run every cycle after command draining.
    ///
    /// Once `now` reaches an armed deadline the aspect is forced back to
    /// `Red`, written through to the lamps and the timer disarmed. Returns
    /// whether a reversion happened.
    pub fn poll_revert<L: SignalLamps>(&mut self, now: Instant, lamps: &mut L) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.state = SignalState::Red;
                self.deadline = None;
                lamps.set(SignalState::Red);
                true
            }
            _ => false,
        }
    }
}
