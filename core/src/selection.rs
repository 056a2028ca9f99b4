use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of picking a cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    /// First pick of a pair, now showing its color
    Revealed,
    Matched,
    Mismatched,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Matched => true,
            Mismatched => true,
        }
    }
}

/// Two-pick matching state of a round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    selected: Option<Coord2>,
    found_pairs: CellCount,
}

impl Round {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn found_pairs(&self) -> CellCount {
        self.found_pairs
    }

    /// Applies one pick. Pressing a matched cell or the cell already revealed does nothing.
    pub fn handle_selection(
        &mut self,
        board: &mut Board,
        key: Option<Coord2>,
        now: Timestamp,
        config: &GameConfig,
    ) -> SelectOutcome {
        use SelectOutcome::*;

        let Some(key) = key else {
            return NoChange;
        };
        if board[key].is_matched() {
            return NoChange;
        }

        let Some(selected) = self.selected else {
            let cell = &mut board[key];
            cell.reset_blink();
            let color = cell.color();
            board.paint(key, color);
            self.selected = Some(key);
            log::debug!("Revealed {:?}", key);
            return Revealed;
        };

        if key == selected {
            return NoChange;
        }

        let selected_color = board[selected].color();
        let key_color = board[key].color();
        self.selected = None;

        if selected_color == key_color {
            board[selected].mark_matched();
            board[key].mark_matched();
            board.start_blink(selected, config.match_blink(selected_color), now);
            board.start_blink(key, config.match_blink(key_color), now);
            self.found_pairs += 1;
            log::debug!(
                "Matched {:?} with {:?}, {} pairs found",
                selected,
                key,
                self.found_pairs
            );
            Matched
        } else {
            board.start_blink(selected, config.mismatch_blink(selected_color), now);
            board.start_blink(key, config.mismatch_blink(key_color), now);
            board.paint(selected, Color::OFF);
            log::debug!("No match between {:?} and {:?}", selected, key);
            Mismatched
        }
    }
}
