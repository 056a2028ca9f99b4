#![no_std]

extern crate alloc;

use core::mem;
use core::ops::{Index, IndexMut};
use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use audio::*;
pub use blink::*;
pub use cell::*;
pub use celebration::*;
pub use color::*;
pub use demo::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use hardware::*;
pub use input::*;
pub use selection::*;
pub use settings::*;
pub use types::*;

mod audio;
mod blink;
mod celebration;
mod cell;
mod color;
mod demo;
mod engine;
mod error;
mod generator;
mod hardware;
mod input;
mod selection;
mod settings;
mod types;

/// Tunables of a game, all times in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub hold_delay_ms: u64,
    pub match_blinks: u8,
    pub match_blink_period_ms: u64,
    pub mismatch_blinks: u8,
    pub mismatch_blink_period_ms: u64,
    pub confirm_blinks: u8,
    pub confirm_blink_period_ms: u64,
    pub demo_interval_ms: u64,
    pub demo_blinks: u8,
    pub demo_blink_period_ms: u64,
    pub celebration_ms: u64,
    pub brightness: f32,
    pub music_volume: f32,
    pub effects_volume: f32,
    pub adjust_step: f32,
    pub reveal_colors: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            hold_delay_ms: 300,
            match_blinks: 3,
            match_blink_period_ms: 50,
            mismatch_blinks: 1,
            mismatch_blink_period_ms: 500,
            confirm_blinks: 1,
            confirm_blink_period_ms: 100,
            demo_interval_ms: 1500,
            demo_blinks: 2,
            demo_blink_period_ms: 150,
            celebration_ms: 4000,
            brightness: 0.2,
            music_volume: 0.25,
            effects_volume: 1.0,
            adjust_step: 0.1,
            reveal_colors: false,
        }
    }
}

impl GameConfig {
    pub const fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    pub const fn demo_interval(&self) -> Duration {
        Duration::from_millis(self.demo_interval_ms)
    }

    pub const fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    /// Both cells of a found pair flash their own color.
    pub const fn match_blink(&self, color: Color) -> BlinkSpec {
        BlinkSpec::new(
            self.match_blinks,
            Duration::from_millis(self.match_blink_period_ms),
            color,
        )
    }

    pub const fn mismatch_blink(&self, color: Color) -> BlinkSpec {
        BlinkSpec::new(
            self.mismatch_blinks,
            Duration::from_millis(self.mismatch_blink_period_ms),
            color,
        )
    }

    /// Feedback flash once a hold gesture fired.
    pub const fn confirm_blink(&self) -> BlinkSpec {
        BlinkSpec::new(
            self.confirm_blinks,
            Duration::from_millis(self.confirm_blink_period_ms),
            Color::WHITE,
        )
    }

    pub const fn demo_blink(&self, color: Color) -> BlinkSpec {
        BlinkSpec::new(
            self.demo_blinks,
            Duration::from_millis(self.demo_blink_period_ms),
            color,
        )
    }
}

/// Color writes waiting to be flushed to the grid driver.
pub type Updates = SmallVec<[(Coord2, Color); 8]>;

/// Cell records plus a mirror of what is currently lit on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    frame: Array2<Color>,
    #[serde(skip)]
    updates: Updates,
}

impl Board {
    pub fn from_cells(cells: Array2<Cell>) -> Self {
        let frame = Array2::from_elem(cells.raw_dim(), Color::OFF);
        Self {
            cells,
            frame,
            updates: Updates::new(),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols.try_into().unwrap(), rows.try_into().unwrap())
    }

    pub fn total_cells(&self) -> u16 {
        self.cells.len().try_into().unwrap()
    }

    pub fn total_pairs(&self) -> CellCount {
        (self.total_cells() / 2).try_into().unwrap()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if is_in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords))
        }
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_coords(self.size())
    }

    /// Color currently lit at `coords`.
    pub fn rendered(&self, coords: Coord2) -> Color {
        self.frame[coords.to_nd_index()]
    }

    /// Lights `coords`, queueing a driver write only when the pixel changes.
    pub fn paint(&mut self, coords: Coord2, color: Color) {
        let pixel = &mut self.frame[coords.to_nd_index()];
        if *pixel != color {
            *pixel = color;
            self.updates.push((coords, color));
        }
    }

    /// Forgets pending writes and marks every pixel as off, to mirror a driver fill.
    pub fn clear_frame(&mut self) {
        self.frame.fill(Color::OFF);
        self.updates.clear();
    }

    pub fn take_updates(&mut self) -> Updates {
        mem::take(&mut self.updates)
    }

    /// Starts a blink from the off phase so both cells of a pair stay in step.
    ///
    /// Zero blinks settle the cell right away: matched cells take the highlight, others keep
    /// their pixel.
    pub fn start_blink(&mut self, coords: Coord2, spec: BlinkSpec, now: Timestamp) {
        if spec.times == 0 {
            self[coords].reset_blink();
            if self[coords].is_matched() {
                self.paint(coords, Color::MATCHED);
            }
            return;
        }
        self.paint(coords, Color::OFF);
        self[coords].start_blink(spec, now);
    }

    pub fn attach_hold(&mut self, coords: Coord2, action: Action, delay: Duration) {
        self[coords].make_holdable(action, delay);
    }

    pub fn is_idle(&self) -> bool {
        !self.cells.iter().any(Cell::is_blinking)
    }

    pub fn matched_count(&self) -> u16 {
        self.cells
            .iter()
            .filter(|cell| cell.is_matched())
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_cells(Array2::from_elem(nd_shape(GRID_SIZE), Cell::new(Color::RED)))
    }

    #[test]
    fn board_reports_fixed_grid_shape() {
        let board = board();

        assert_eq!(board.size(), GRID_SIZE);
        assert_eq!(board.total_cells(), 32);
        assert_eq!(board.total_pairs(), 16);
    }

    #[test]
    fn paint_only_queues_changes() {
        let mut board = board();

        board.paint((1, 1), Color::OFF);
        board.paint((2, 1), Color::BLUE);
        board.paint((2, 1), Color::BLUE);

        assert_eq!(board.take_updates().as_slice(), &[((2, 1), Color::BLUE)]);
        assert!(board.take_updates().is_empty());
        assert_eq!(board.rendered((2, 1)), Color::BLUE);
    }

    #[test]
    fn validate_rejects_out_of_grid() {
        let board = board();

        assert_eq!(board.validate_coords((7, 3)), Ok((7, 3)));
        assert_eq!(
            board.validate_coords((8, 3)),
            Err(GameError::InvalidCoords((8, 3)))
        );
    }

    #[test]
    fn start_blink_forces_off_phase() {
        let mut board = board();
        board.paint((0, 2), Color::RED);
        board.take_updates();

        let spec = BlinkSpec::new(2, DEFAULT_BLINK_PERIOD, Color::RED);
        board.start_blink((0, 2), spec, Duration::ZERO);

        assert_eq!(board.rendered((0, 2)), Color::OFF);
        assert_eq!(board[(0, 2)].blinks_remaining(), 2);
        assert!(!board.is_idle());
    }

    #[test]
    fn zero_blinks_settle_immediately() {
        let mut board = board();
        board.paint((3, 1), Color::RED);
        board.paint((4, 1), Color::RED);
        board[(3, 1)].mark_matched();
        board.take_updates();
        let none = BlinkSpec::new(0, DEFAULT_BLINK_PERIOD, Color::RED);

        board.start_blink((3, 1), none, Duration::ZERO);
        board.start_blink((4, 1), none, Duration::ZERO);

        assert_eq!(board.rendered((3, 1)), Color::MATCHED);
        assert_eq!(board.rendered((4, 1)), Color::RED);
        assert!(board.is_idle());
        assert_eq!(board.take_updates().as_slice(), &[((3, 1), Color::MATCHED)]);
    }

    #[test]
    fn config_default_timings() {
        let config = GameConfig::default();

        assert_eq!(config.hold_delay(), Duration::from_millis(300));
        assert_eq!(config.match_blink(Color::RED).times, 3);
        assert_eq!(config.mismatch_blink(Color::RED).period, Duration::from_millis(500));
        assert_eq!(config.confirm_blink().on_color, Color::WHITE);
    }
}
