//! Turns raw pressed-key snapshots into edge-triggered presses and hold gestures.

use crate::*;

/// What one snapshot meant, relative to the previous one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyEvents {
    /// The one new press to act upon this tick.
    pub pressed: Option<Coord2>,
    /// Keys down both in this snapshot and the previous one.
    pub held: KeySet,
    /// Keys down in the previous snapshot but not in this one.
    pub released: KeySet,
    /// Hold action that reached its delay this tick, fired at most once per physical press.
    pub hold_action: Option<(Coord2, Action)>,
}

#[derive(Clone, Debug, Default)]
pub struct InputDebouncer {
    last_pressed: KeySet,
}

impl InputDebouncer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Forgets the previous snapshot, so keys still down count as new presses next time.
    pub fn reset(&mut self) {
        self.last_pressed.clear();
    }

    pub fn last_pressed(&self) -> &KeySet {
        &self.last_pressed
    }

    /// Diffs `pressed` against the previous snapshot and runs hold timing on holdable cells.
    ///
    /// A holdable key never reports a press while it is down. Releasing it before its hold fired
    /// reports the release as a tap, and a fired hold starts the confirmation blink.
    pub fn process(
        &mut self,
        pressed: &KeySet,
        board: &mut Board,
        now: Timestamp,
        confirm: BlinkSpec,
    ) -> KeyEvents {
        let mut new_presses: KeySet = pressed.difference(&self.last_pressed).copied().collect();
        let held: KeySet = pressed.intersection(&self.last_pressed).copied().collect();
        let released: KeySet = self.last_pressed.difference(pressed).copied().collect();

        for &key in &released {
            let cell = &mut board[key];
            if !cell.holdable {
                continue;
            }
            if !cell.hold_triggered {
                log::debug!("Short tap on holdable {:?}", key);
                new_presses.insert(key);
            }
            cell.reset_hold();
        }

        let mut hold_action = None;
        for &key in pressed {
            let cell = &mut board[key];
            if !cell.holdable {
                continue;
            }
            new_presses.remove(&key);

            let Some(started) = cell.hold_started else {
                cell.hold_started = Some(now);
                continue;
            };
            if now < started + cell.hold_delay || cell.hold_triggered {
                continue;
            }

            cell.hold_triggered = true;
            if let Some(action) = cell.hold_action {
                log::debug!("Hold on {:?} fired {:?}", key, action);
                hold_action = Some((key, action));
            }
            board.start_blink(key, confirm, now);
        }

        let pressed_key = new_presses.iter().min().copied();
        if new_presses.len() > 1 {
            log::warn!(
                "{} keys pressed in one tick, only handling {:?}",
                new_presses.len(),
                pressed_key
            );
        }

        self.last_pressed.clone_from(pressed);

        KeyEvents {
            pressed: pressed_key,
            held,
            released,
            hold_action,
        }
    }
}
