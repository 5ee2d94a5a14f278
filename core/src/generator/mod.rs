use crate::*;
pub use random::*;

mod random;

pub trait ProblemGenerator {
    fn generate(&mut self, level: Level) -> Result<Problem>;

    /// Table that maps levels to board configurations and stage numbers.
    fn stages(&self) -> &StageTable;
}

impl<G: ProblemGenerator + ?Sized> ProblemGenerator for &mut G {
    fn generate(&mut self, level: Level) -> Result<Problem> {
        (**self).generate(level)
    }

    fn stages(&self) -> &StageTable {
        (**self).stages()
    }
}

/// Generates a problem for `level` from a fresh random seed.
#[cfg(feature = "std")]
pub fn generate_problem(level: Level) -> Result<Problem> {
    RandomProblemGenerator::new(rand::random()).generate(level)
}
