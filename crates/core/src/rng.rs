//! RNG module - where new piece kinds come from
//!
//! [`UniformPieces`] picks every kind with equal probability from a seeded
//! generator, so the same seed always yields the same game. [`ScriptedPieces`]
//! replays a fixed list, which keeps tests and demos reproducible without
//! depending on generator internals.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplier of the next piece kind to spawn
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random kinds from a seeded generator
#[derive(Debug, Clone)]
pub struct UniformPieces {
    seed: u64,
    rng: StdRng,
}

impl UniformPieces {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for UniformPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformPieces {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Fixed, repeating sequence of kinds
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedPieces {
    /// An empty script always yields `I`.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            index: 0,
        }
    }

    /// Same kind forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::I;
        }
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
