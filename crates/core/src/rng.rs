//! RNG module - injectable piece sources
//!
//! The engine asks a [`PieceSource`] for every new piece. The default source
//! draws uniformly and independently from the seven kinds (no 7-bag, repeats
//! are allowed). Tests can inject a fixed sequence with [`ScriptedPieces`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplier of the next piece kind
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

impl<T: PieceSource + ?Sized> PieceSource for Box<T> {
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}

/// Uniform, independent random piece selection
#[derive(Debug, Clone)]
pub struct UniformPieces<R = StdRng> {
    rng: R,
}

impl UniformPieces<StdRng> {
    /// Deterministic source: the same seed yields the same piece sequence
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> UniformPieces<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PieceSource for UniformPieces<R> {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }
}

/// Fixed piece sequence that repeats once exhausted
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    sequence: Vec<PieceKind>,
    index: usize,
}

impl ScriptedPieces {
    pub fn new(sequence: impl Into<Vec<PieceKind>>) -> Self {
        let sequence = sequence.into();
        assert!(!sequence.is_empty(), "scripted piece sequence is empty");
        Self { sequence, index: 0 }
    }

    /// Source that always yields `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for ScriptedPieces {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.sequence[self.index % self.sequence.len()];
        self.index += 1;
        kind
    }
}
