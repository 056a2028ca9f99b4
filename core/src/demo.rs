use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::*;

/// Attract mode: while nobody plays, flash a random pair now and then.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemoPlayer {
    next_step: Option<Timestamp>,
}

impl DemoPlayer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        self.next_step = None;
    }

    /// Flashes one same-colored pair once the previous flash is over and the interval elapsed.
    ///
    /// Cells are only blinked, never marked matched.
    pub fn step(
        &mut self,
        board: &mut Board,
        rng: &mut SmallRng,
        now: Timestamp,
        config: &GameConfig,
    ) -> Option<(Coord2, Coord2)> {
        use rand::prelude::*;

        if !board.is_idle() {
            return None;
        }
        let due = *self.next_step.get_or_insert(now);
        if now < due {
            return None;
        }
        self.next_step = Some(now + config.demo_interval());

        let unmatched: Vec<Coord2> = board
            .iter_coords()
            .filter(|&coords| !board[coords].is_matched())
            .collect();
        if unmatched.is_empty() {
            return None;
        }
        let first = unmatched[rng.random_range(0..unmatched.len())];
        let color = board[first].color();
        let partners: Vec<Coord2> = unmatched
            .iter()
            .copied()
            .filter(|&coords| coords != first && board[coords].color() == color)
            .collect();
        if partners.is_empty() {
            return None;
        }
        let second = partners[rng.random_range(0..partners.len())];

        board.start_blink(first, config.demo_blink(color), now);
        board.start_blink(second, config.demo_blink(color), now);
        log::trace!("Demo flashing {:?} and {:?}", first, second);
        Some((first, second))
    }
}
