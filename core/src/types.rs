use core::time::Duration;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for cell and pair counts.
pub type CellCount = u8;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Monotonic time since the host clock started, supplied once per tick.
pub type Timestamp = Duration;

/// Set of currently pressed keys, as reported by the grid driver.
pub type KeySet = hashbrown::HashSet<Coord2>;

pub const GRID_WIDTH: Coord = 8;
pub const GRID_HEIGHT: Coord = 4;
pub const GRID_SIZE: Coord2 = (GRID_WIDTH, GRID_HEIGHT);

/// The only cell carrying a hold action.
pub const ORIGIN: Coord2 = (0, 0);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Row-major: the flat offset of `(x, y)` is `y * width + x`.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Shape `[rows, columns]` of an `Array2` holding a grid of `size`.
pub const fn nd_shape(size: Coord2) -> [usize; 2] {
    [size.1 as usize, size.0 as usize]
}

pub const fn mult(a: Coord, b: Coord) -> u16 {
    let a = a as u16;
    let b = b as u16;
    a.saturating_mul(b)
}

pub const fn is_in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Iterates every coordinate of a grid of `size` in row-major order.
pub fn iter_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    let (width, height) = size;
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}
