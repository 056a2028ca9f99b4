use std::fmt::Write as _;

use trellis_memory_core::{Color, Coord2, GRID_SIZE, GridDriver, KeySet, iter_coords, mult};

/// In-memory key/LED grid. Presses are fed by the caller, pixels are drawn to a terminal on demand.
#[derive(Clone, Debug)]
pub struct SimGrid {
    pressed: KeySet,
    pixels: Vec<Color>,
    brightness: f32,
    dirty: bool,
}

impl SimGrid {
    pub fn new() -> Self {
        Self {
            pressed: KeySet::default(),
            pixels: vec![Color::OFF; usize::from(mult(GRID_SIZE.0, GRID_SIZE.1))],
            brightness: 1.0,
            dirty: true,
        }
    }

    pub fn set_pressed(&mut self, pressed: KeySet) {
        self.pressed = pressed;
    }

    pub fn pixel(&self, coords: Coord2) -> Color {
        self.pixels[Self::offset(coords)]
    }

    /// Whether anything changed since the last [`SimGrid::take_frame`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Draws the grid as ANSI true-color blocks, one line per row.
    pub fn take_frame(&mut self) -> String {
        self.dirty = false;
        let mut frame = String::new();
        let mut row = 0;
        for coords in iter_coords(GRID_SIZE) {
            if coords.1 != row {
                frame.push('\n');
                row = coords.1;
            }
            let (r, g, b) = self.pixel(coords).dimmed(self.brightness).components();
            let _ = write!(frame, "\x1b[38;2;{};{};{}m██\x1b[0m", r, g, b);
        }
        frame.push('\n');
        frame
    }

    fn offset((x, y): Coord2) -> usize {
        usize::from(y) * usize::from(GRID_SIZE.0) + usize::from(x)
    }
}

impl GridDriver for SimGrid {
    fn read_pressed(&mut self) -> KeySet {
        self.pressed.clone()
    }

    fn set_pixel(&mut self, coords: Coord2, color: Color) {
        self.pixels[Self::offset(coords)] = color;
        self.dirty = true;
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
        self.dirty = true;
    }

    fn brightness(&self) -> f32 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: f32) {
        log::debug!("Grid brightness {:.2}", brightness);
        self.brightness = brightness;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_a_line_per_row() {
        let mut grid = SimGrid::new();
        grid.set_pixel((7, 3), Color::RED);

        let frame = grid.take_frame();

        assert_eq!(frame.lines().count(), 4);
        assert_eq!(frame.matches("██").count(), 32);
        assert!(frame.lines().last().unwrap().contains("\x1b[38;2;255;0;0m"));
        assert!(!grid.is_dirty());
    }

    #[test]
    fn fill_covers_every_pixel() {
        let mut grid = SimGrid::new();

        grid.fill(Color::BLUE);

        assert!(iter_coords(GRID_SIZE).all(|coords| grid.pixel(coords) == Color::BLUE));
        assert!(grid.is_dirty());
    }

    #[test]
    fn pressed_snapshot_is_reported() {
        let mut grid = SimGrid::new();
        let keys: KeySet = [(2, 1), (5, 0)].into_iter().collect();

        grid.set_pressed(keys.clone());

        assert_eq!(grid.read_pressed(), keys);
    }
}
