use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::{Duration, Instant};

use trackguard_core::{
    decode, CommandQueue, SignalController, SignalLamps, SignalState, COMMAND_QUEUE_DEPTH,
};

const HOLD: Duration = Duration::from_secs(10);

/// Records every write-through so actuation ordering can be asserted.
#[derive(Default)]
struct RecordingLamps {
    writes: Vec<SignalState>,
}

impl SignalLamps for RecordingLamps {
    fn set(&mut self, state: SignalState) {
        self.writes.push(state);
    }
}

fn at_ms(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

/// The invariant every test leans on: deadline armed iff the aspect is not Red.
fn assert_timer_invariant(ctl: &SignalController) {
    assert_eq!(
        ctl.deadline().is_some(),
        ctl.state() != SignalState::Red,
        "deadline must be armed exactly when the aspect is not Red"
    );
}

#[test]
fn starts_red_with_timer_disarmed() {
    let ctl = SignalController::new(HOLD);
    assert_eq!(ctl.state(), SignalState::Red);
    assert_eq!(ctl.deadline(), None);
    assert_timer_invariant(&ctl);
}

#[test]
fn non_red_command_arms_the_deadline() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    assert!(ctl.apply(SignalState::Green, at_ms(0), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Green);
    assert_eq!(ctl.deadline(), Some(at_ms(0) + HOLD));
    assert_eq!(lamps.writes, [SignalState::Green]);
    assert_timer_invariant(&ctl);
}

#[test]
fn red_command_disarms_the_deadline() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    ctl.apply(SignalState::Yellow, at_ms(0), &mut lamps);
    assert!(ctl.apply(SignalState::Red, at_ms(500), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Red);
    assert_eq!(ctl.deadline(), None);
    assert_eq!(lamps.writes, [SignalState::Yellow, SignalState::Red]);
    assert_timer_invariant(&ctl);
}

#[test]
fn same_state_command_is_a_complete_no_op() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    ctl.apply(SignalState::Green, at_ms(0), &mut lamps);
    let armed = ctl.deadline();

    assert!(!ctl.apply(SignalState::Green, at_ms(5_000), &mut lamps));
    assert_eq!(ctl.deadline(), armed, "no spurious re-arm");
    assert_eq!(lamps.writes, [SignalState::Green], "no actuator rewrite");
    assert_timer_invariant(&ctl);
}

#[test]
fn transition_between_non_red_aspects_rearms() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    ctl.apply(SignalState::Yellow, at_ms(0), &mut lamps);
    ctl.apply(SignalState::Green, at_ms(3_000), &mut lamps);
    assert_eq!(ctl.deadline(), Some(at_ms(3_000) + HOLD));
    assert_timer_invariant(&ctl);
}

#[test]
fn revert_fires_only_once_the_deadline_is_reached() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    ctl.apply(SignalState::Green, at_ms(0), &mut lamps);

    assert!(!ctl.poll_revert(at_ms(9_999), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Green);

    assert!(ctl.poll_revert(at_ms(10_000), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Red);
    assert_eq!(ctl.deadline(), None);
    assert_eq!(lamps.writes, [SignalState::Green, SignalState::Red]);
    assert_timer_invariant(&ctl);
}

#[test]
fn revert_is_inert_while_disarmed() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    assert!(!ctl.poll_revert(at_ms(1_000_000), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Red);
    assert!(lamps.writes.is_empty());
}

#[test]
fn command_drained_in_the_same_cycle_outlives_the_old_deadline() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    ctl.apply(SignalState::Green, at_ms(0), &mut lamps);

    // A cycle at the old expiry: the command is drained first, so the
    // timeout check runs against the freshly re-armed deadline.
    ctl.apply(SignalState::Yellow, at_ms(10_000), &mut lamps);
    assert!(!ctl.poll_revert(at_ms(10_000), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Yellow);
    assert_eq!(ctl.deadline(), Some(at_ms(10_000) + HOLD));
    assert_timer_invariant(&ctl);
}

#[test]
fn commands_apply_in_fifo_order_with_intermediate_writes() {
    let queue: CommandQueue<NoopRawMutex> = CommandQueue::new();
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    queue.offer(SignalState::Green).unwrap();
    queue.offer(SignalState::Yellow).unwrap();
    queue.offer(SignalState::Red).unwrap();

    // One command per cycle, timeout checked after each drain.
    let mut now = at_ms(0);
    while let Some(target) = queue.try_take() {
        ctl.apply(target, now, &mut lamps);
        ctl.poll_revert(now, &mut lamps);
        assert_timer_invariant(&ctl);
        now += Duration::from_millis(50);
    }

    assert_eq!(ctl.state(), SignalState::Red);
    assert_eq!(
        lamps.writes,
        [SignalState::Green, SignalState::Yellow, SignalState::Red]
    );
}

#[test]
fn full_queue_drops_the_newest_command_only() {
    let queue: CommandQueue<NoopRawMutex> = CommandQueue::new();

    for i in 0..COMMAND_QUEUE_DEPTH {
        let target = if i % 2 == 0 {
            SignalState::Green
        } else {
            SignalState::Yellow
        };
        queue.offer(target).unwrap();
    }

    // The overflowing command comes straight back; nothing queued moved.
    assert_eq!(queue.offer(SignalState::Red), Err(SignalState::Red));

    for i in 0..COMMAND_QUEUE_DEPTH {
        let expected = if i % 2 == 0 {
            SignalState::Green
        } else {
            SignalState::Yellow
        };
        assert_eq!(queue.try_take(), Some(expected));
    }
    assert_eq!(queue.try_take(), None);
}

#[test]
fn received_token_drives_the_lamps_end_to_end() {
    let mut ctl = SignalController::new(HOLD);
    let mut lamps = RecordingLamps::default();

    // "LED3" over the link means Green.
    let target = decode(b"LED3").expect("LED3 is in the vocabulary");
    ctl.apply(target, at_ms(0), &mut lamps);
    assert_eq!(ctl.state(), SignalState::Green);
    assert_eq!(lamps.writes, [SignalState::Green]);
    assert_eq!(ctl.deadline(), Some(at_ms(0) + HOLD));

    // Silence for the full hold period forces Red.
    assert!(ctl.poll_revert(at_ms(10_050), &mut lamps));
    assert_eq!(ctl.state(), SignalState::Red);
    assert_eq!(ctl.deadline(), None);

    // An unrecognized token never reaches the controller at all.
    assert_eq!(decode(b"PING"), None);
}
