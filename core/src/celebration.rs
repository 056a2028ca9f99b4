use core::time::Duration;

use crate::*;

const HUE_STEP: u8 = 8;
const FRAME: Duration = Duration::from_millis(5);

/// Rainbow fill shown after a win, running until a deadline instead of stalling the tick loop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Celebration {
    started: Timestamp,
    until: Timestamp,
}

impl Celebration {
    pub fn new(now: Timestamp, duration: Duration) -> Self {
        Self {
            started: now,
            until: now + duration,
        }
    }

    pub fn is_over(&self, now: Timestamp) -> bool {
        now >= self.until
    }

    /// Color of the whole grid at `now`, cycling through 32 hues one frame at a time.
    pub fn color_at(&self, now: Timestamp) -> Color {
        let frame = now.saturating_sub(self.started).as_millis() / FRAME.as_millis();
        let hues = u128::from(u8::MAX / HUE_STEP + 1);
        let pos = (frame % hues) as u8 * HUE_STEP;
        wheel(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_the_wheel() {
        let celebration = Celebration::new(Duration::from_secs(1), Duration::from_secs(4));

        assert_eq!(celebration.color_at(Duration::from_secs(1)), wheel(0));
        assert_eq!(celebration.color_at(Duration::from_millis(1005)), wheel(8));
        assert_eq!(celebration.color_at(Duration::from_millis(1160)), wheel(0));
    }

    #[test]
    fn ends_at_deadline() {
        let celebration = Celebration::new(Duration::ZERO, Duration::from_secs(4));

        assert!(!celebration.is_over(Duration::from_millis(3999)));
        assert!(celebration.is_over(Duration::from_secs(4)));
    }
}
