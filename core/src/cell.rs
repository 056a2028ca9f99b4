use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Action fired once when a holdable cell is held past its delay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    ToggleSettings,
}

/// Parameters of one blink sequence.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlinkSpec {
    pub times: u8,
    pub period: Duration,
    pub on_color: Color,
    pub off_color: Color,
}

impl BlinkSpec {
    pub const fn new(times: u8, period: Duration, on_color: Color) -> Self {
        Self {
            times,
            period,
            on_color,
            off_color: Color::OFF,
        }
    }
}

pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(50);
pub const DEFAULT_HOLD_DELAY: Duration = Duration::from_millis(300);

/// Match, blink and hold metadata of one grid position.
///
/// Cells are built fresh by the pair generator on every round, nothing is shared between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) matched: bool,
    pub(crate) color: Color,
    pub(crate) blink_deadline: Option<Timestamp>,
    pub(crate) blinks_remaining: u8,
    pub(crate) blink_period: Duration,
    pub(crate) blink_on_color: Color,
    pub(crate) blink_off_color: Color,
    pub(crate) holdable: bool,
    pub(crate) hold_action: Option<Action>,
    pub(crate) hold_delay: Duration,
    pub(crate) hold_started: Option<Timestamp>,
    pub(crate) hold_triggered: bool,
}

impl Cell {
    pub const fn new(color: Color) -> Self {
        Self {
            matched: false,
            color,
            blink_deadline: None,
            blinks_remaining: 0,
            blink_period: DEFAULT_BLINK_PERIOD,
            blink_on_color: Color::WHITE,
            blink_off_color: Color::OFF,
            holdable: false,
            hold_action: None,
            hold_delay: DEFAULT_HOLD_DELAY,
            hold_started: None,
            hold_triggered: false,
        }
    }

    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn is_blinking(&self) -> bool {
        self.blinks_remaining > 0
    }

    pub const fn blinks_remaining(&self) -> u8 {
        self.blinks_remaining
    }

    pub const fn blink_deadline(&self) -> Option<Timestamp> {
        self.blink_deadline
    }

    pub const fn blink_period(&self) -> Duration {
        self.blink_period
    }

    pub const fn blink_on_color(&self) -> Color {
        self.blink_on_color
    }

    pub const fn is_holdable(&self) -> bool {
        self.holdable
    }

    pub const fn hold_action(&self) -> Option<Action> {
        self.hold_action
    }

    pub const fn hold_triggered(&self) -> bool {
        self.hold_triggered
    }

    /// Schedules `spec.times` on/off cycles, the first phase flip is due at `now`.
    pub(crate) fn start_blink(&mut self, spec: BlinkSpec, now: Timestamp) {
        if spec.times == 0 {
            self.reset_blink();
            return;
        }
        self.blinks_remaining = spec.times;
        self.blink_period = spec.period;
        self.blink_on_color = spec.on_color;
        self.blink_off_color = spec.off_color;
        self.blink_deadline = Some(now);
    }

    pub(crate) fn reset_blink(&mut self) {
        self.blinks_remaining = 0;
        self.blink_deadline = None;
        self.blink_period = DEFAULT_BLINK_PERIOD;
        self.blink_on_color = Color::WHITE;
        self.blink_off_color = Color::OFF;
    }

    pub(crate) fn make_holdable(&mut self, action: Action, delay: Duration) {
        self.holdable = true;
        self.hold_action = Some(action);
        self.hold_delay = delay;
        self.reset_hold();
    }

    pub(crate) fn reset_hold(&mut self) {
        self.hold_started = None;
        self.hold_triggered = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}
