use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::*;

/// Scrambles an all-`O` target with distinct random taps, then applies a few
/// extra random taps to both boards so that repeated configurations look
/// different.
#[derive(Clone, Debug)]
pub struct RandomProblemGenerator {
    rng: SmallRng,
    stages: StageTable,
}

impl RandomProblemGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_stages(seed, StageTable::default())
    }

    pub fn with_stages(seed: u64, stages: StageTable) -> Self {
        use rand::SeedableRng;

        Self {
            rng: SmallRng::seed_from_u64(seed),
            stages,
        }
    }
}

impl ProblemGenerator for RandomProblemGenerator {
    fn generate(&mut self, level: Level) -> Result<Problem> {
        use rand::prelude::*;

        let LevelConfig { size, taps } = self.stages.config_for_level(level)?;
        let mut target = Board::new(size);
        let total_cells = target.total_cells();

        let taps = if usize::from(taps) > total_cells {
            log::warn!(
                "Too many taps for the board, requested {} but only fits {}",
                taps,
                total_cells
            );
            // fewer cells than `taps`, so this fits
            total_cells as TapCount
        } else {
            taps
        };

        // distinct taps: prefix of a shuffled list of every cell
        let mut cells: Vec<Index2> = target.indexed_cells().collect();
        let (picked, _) = cells.partial_shuffle(&mut self.rng, taps.into());
        let solution: Vec<Coord2> = picked.iter().map(|&index| index.to_coord2()).collect();

        let mut initial = target.clone();
        for &tap in &solution {
            initial.flip(tap);
        }

        // shared taps cancel out between the two boards, keeping the distance
        let shared_taps = self.rng.random_range(0..(size / 2).max(1));
        for _ in 0..shared_taps {
            let tap = (
                self.rng.random_range(0..size).into(),
                self.rng.random_range(0..size).into(),
            );
            initial.flip(tap);
            target.flip(tap);
        }

        log::debug!(
            "Generated level {} ({}x{}, {} taps, {} shared)",
            level,
            size,
            size,
            taps,
            shared_taps
        );
        Ok(Problem::new(level, size, initial, target, solution))
    }

    fn stages(&self) -> &StageTable {
        &self.stages
    }
}
