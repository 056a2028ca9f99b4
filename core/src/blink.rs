use crate::*;

impl Board {
    /// Advances every due blink by one phase, queueing the color changes.
    ///
    /// Returns whether processing is complete, that is no cell has blinks left once this tick is
    /// done.
    pub fn process_blinks(&mut self, now: Timestamp, reveal_colors: bool) -> bool {
        for coords in self.iter_coords() {
            let cell = &self[coords];
            let Some(deadline) = cell.blink_deadline else {
                continue;
            };
            if now < deadline {
                continue;
            }

            let period = cell.blink_period;
            if self.rendered(coords).is_off() {
                let on_color = if reveal_colors {
                    cell.color
                } else {
                    cell.blink_on_color
                };
                log::trace!("Blink on {:?}", coords);
                self.paint(coords, on_color);
                self[coords].blink_deadline = Some(now + period);
            } else {
                let off_color = cell.blink_off_color;
                log::trace!("Blink off {:?}", coords);
                self.paint(coords, off_color);

                let cell = &mut self[coords];
                cell.blinks_remaining -= 1;
                if cell.blinks_remaining > 0 {
                    cell.blink_deadline = Some(now + period);
                    continue;
                }

                cell.reset_blink();
                if cell.matched {
                    self.paint(coords, Color::MATCHED);
                }
            }
        }

        self.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use ndarray::Array2;

    const PERIOD: Duration = Duration::from_millis(50);

    fn board() -> Board {
        let cells = Array2::from_shape_fn(nd_shape(GRID_SIZE), |(_, col)| {
            Cell::new(PALETTE[col % PALETTE.len()])
        });
        Board::from_cells(cells)
    }

    fn ms(millis: u64) -> Timestamp {
        Duration::from_millis(millis)
    }

    #[test]
    fn idle_board_is_left_untouched() {
        let mut board = board();
        board.paint((3, 3), Color::BLUE);
        board.take_updates();
        let before = board.clone();

        assert!(board.process_blinks(ms(100), false));
        assert!(board.process_blinks(ms(200), false));
        assert_eq!(board, before);
        assert!(board.take_updates().is_empty());
    }

    #[test]
    fn full_cycle_turns_on_then_off() {
        let mut board = board();
        board.start_blink((1, 0), BlinkSpec::new(1, PERIOD, Color::WHITE), ms(0));

        assert!(!board.process_blinks(ms(0), false));
        assert_eq!(board.rendered((1, 0)), Color::WHITE);
        assert_eq!(board[(1, 0)].blink_deadline(), Some(ms(50)));

        assert!(!board.process_blinks(ms(49), false));
        assert_eq!(board.rendered((1, 0)), Color::WHITE);

        assert!(board.process_blinks(ms(50), false));
        assert_eq!(board.rendered((1, 0)), Color::OFF);
        assert!(!board[(1, 0)].is_blinking());
        assert_eq!(board[(1, 0)].blink_deadline(), None);
    }

    #[test]
    fn count_decrements_on_off_phase_only() {
        let mut board = board();
        board.start_blink((2, 1), BlinkSpec::new(3, PERIOD, Color::WHITE), ms(0));

        board.process_blinks(ms(0), false);
        assert_eq!(board[(2, 1)].blinks_remaining(), 3);
        board.process_blinks(ms(50), false);
        assert_eq!(board[(2, 1)].blinks_remaining(), 2);
        board.process_blinks(ms(100), false);
        assert_eq!(board[(2, 1)].blinks_remaining(), 2);
        board.process_blinks(ms(150), false);
        assert_eq!(board[(2, 1)].blinks_remaining(), 1);
    }

    #[test]
    fn matched_cell_settles_on_highlight() {
        let mut board = board();
        board[(4, 2)].mark_matched();
        board.start_blink((4, 2), BlinkSpec::new(1, PERIOD, Color::GREEN), ms(0));

        board.process_blinks(ms(0), false);
        assert_eq!(board.rendered((4, 2)), Color::GREEN);
        assert!(board.process_blinks(ms(50), false));
        assert_eq!(board.rendered((4, 2)), Color::MATCHED);
    }

    #[test]
    fn reveal_colors_shows_true_color() {
        let mut board = board();
        let true_color = board[(5, 0)].color();
        board.start_blink((5, 0), BlinkSpec::new(1, PERIOD, Color::WHITE), ms(0));

        board.process_blinks(ms(0), true);

        assert_eq!(board.rendered((5, 0)), true_color);
    }

    #[test]
    fn cells_run_independent_timers() {
        let mut board = board();
        board.start_blink((0, 1), BlinkSpec::new(1, PERIOD, Color::WHITE), ms(0));
        board.start_blink((7, 3), BlinkSpec::new(1, ms(500), Color::WHITE), ms(0));

        board.process_blinks(ms(0), false);
        assert!(!board.process_blinks(ms(50), false));
        assert!(!board[(0, 1)].is_blinking());
        assert!(board[(7, 3)].is_blinking());
        assert!(board.process_blinks(ms(500), false));
    }
}
