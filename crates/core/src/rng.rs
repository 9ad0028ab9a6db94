//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece kind, shuffled with Fisher-Yates. Pieces
//! are drawn from the bag until it is empty, then a new bag is shuffled. This
//! bounds droughts: no kind can appear more than twice in any 12 draws.
//!
//! The shuffle is driven by a small seeded LCG so a given seed always produces
//! the same sequence.

use crate::types::PieceKind;

const BAG_SIZE: usize = PieceKind::ALL.len();

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Current bag of pieces
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next piece to hand out; `BAG_SIZE` means the bag is spent
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: BAG_SIZE,
            rng: SimpleRng::new(seed),
        }
    }

    fn shuffled_bag(rng: &mut SimpleRng) -> [PieceKind; BAG_SIZE] {
        let mut bag = PieceKind::ALL;
        rng.shuffle(&mut bag);
        bag
    }

    /// Draw the next piece, shuffling a fresh bag when the current one is spent
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= BAG_SIZE {
            self.bag = Self::shuffled_bag(&mut self.rng);
            self.bag_index = 0;
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Peek at the next piece without removing it
    ///
    /// When the bag is spent this previews the next shuffle on a cloned RNG, so
    /// the result always matches the following `draw()`.
    pub fn peek(&self) -> PieceKind {
        if self.bag_index < BAG_SIZE {
            return self.bag[self.bag_index];
        }
        let mut preview_rng = self.rng.clone();
        Self::shuffled_bag(&mut preview_rng)[0]
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(0)
    }
}
