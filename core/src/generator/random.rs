use super::*;
use alloc::vec::Vec;

/// Uniformly random perfect matching of the grid into pairs, each pair drawing its color
/// independently from the palette, so colors repeat across pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPairGenerator {
    seed: u64,
}

impl RandomPairGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PairGenerator for RandomPairGenerator {
    fn generate(self, size: Coord2) -> Result<Array2<Cell>> {
        use rand::prelude::*;

        let total_cells = mult(size.0, size.1);
        if total_cells % 2 != 0 {
            return Err(GameError::OddCellCount { cells: total_cells });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut unassigned: Vec<Coord2> = iter_coords(size).collect();
        let mut colors = Array2::from_elem(nd_shape(size), Color::OFF);

        while !unassigned.is_empty() {
            let first = unassigned.swap_remove(rng.random_range(0..unassigned.len()));
            let second = unassigned.swap_remove(rng.random_range(0..unassigned.len()));
            let color = PALETTE[rng.random_range(0..PALETTE.len())];
            colors[first.to_nd_index()] = color;
            colors[second.to_nd_index()] = color;
            log::trace!("Paired {:?} with {:?}", first, second);
        }

        Ok(colors.mapv(Cell::new))
    }
}
