use crate::*;

/// Capabilities the engine needs from the key/LED grid.
pub trait GridDriver {
    /// Keys held down right now.
    fn read_pressed(&mut self) -> KeySet;

    fn set_pixel(&mut self, coords: Coord2, color: Color);

    fn fill(&mut self, color: Color);

    fn brightness(&self) -> f32;

    fn set_brightness(&mut self, brightness: f32);
}

impl<T: GridDriver + ?Sized> GridDriver for &mut T {
    fn read_pressed(&mut self) -> KeySet {
        (**self).read_pressed()
    }

    fn set_pixel(&mut self, coords: Coord2, color: Color) {
        (**self).set_pixel(coords, color)
    }

    fn fill(&mut self, color: Color) {
        (**self).fill(color)
    }

    fn brightness(&self) -> f32 {
        (**self).brightness()
    }

    fn set_brightness(&mut self, brightness: f32) {
        (**self).set_brightness(brightness)
    }
}
