//! RNG module - 7-bag random piece generation
//!
//! Implements the "bag" randomizer: each bag holds one of each piece kind,
//! shuffled. The queue appends a fresh bag whenever fewer than seven upcoming
//! pieces remain, so the lookahead never runs dry.
//!
//! Also provides a simple LCG so every session owns its own seeded generator.

use std::collections::VecDeque;

use log::trace;

use crate::types::{PieceKind, BAG_SIZE};

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
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Upcoming pieces, refilled one shuffled bag at a time
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    rng: SimpleRng,
    seed: u32,
    /// Whether anything has been drawn since the last deal
    drawn: bool,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(BAG_SIZE * 2),
            rng: SimpleRng::new(seed),
            seed,
            drawn: false,
        };
        queue.top_up();
        queue
    }

    /// Append one shuffled bag
    fn refill_bag(&mut self) {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        trace!("refilled bag: {:?}", bag);
        self.upcoming.extend(bag);
    }

    /// Refill until at least one bag's worth of pieces is waiting
    fn top_up(&mut self) {
        while self.upcoming.len() < BAG_SIZE {
            self.refill_bag();
        }
    }

    /// Drop every queued piece and deal a fresh bag.
    ///
    /// An untouched queue is kept as is, so the preview shown before the first
    /// game is what spawns. Otherwise the generator keeps running and
    /// consecutive games get different bags.
    pub fn reset(&mut self) {
        if !self.drawn {
            return;
        }
        self.upcoming.clear();
        self.drawn = false;
        self.top_up();
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        self.top_up();
        let piece = match self.upcoming.pop_front() {
            Some(piece) => piece,
            // top_up guarantees a non-empty queue
            None => PieceKind::ALL[0],
        };
        self.drawn = true;
        self.top_up();
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.upcoming.front().copied()
    }

    /// Owned copy of up to `n` upcoming pieces, in draw order
    pub fn peek_n(&self, n: usize) -> Vec<PieceKind> {
        self.upcoming.iter().take(n).copied().collect()
    }

    /// Copy up to `n` upcoming pieces into `out`, reusing its allocation
    pub fn peek_into(&self, n: usize, out: &mut Vec<PieceKind>) {
        out.clear();
        out.extend(self.upcoming.iter().take(n).copied());
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Seed the queue was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
