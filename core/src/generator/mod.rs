use crate::*;
use ndarray::Array2;
pub use random::*;

mod random;

pub trait PairGenerator {
    /// Builds fresh cells for a grid of `size`, every color shared by an even number of cells.
    fn generate(self, size: Coord2) -> Result<Array2<Cell>>;
}
