//! RNG module - pluggable uniform random source
//!
//! Every engine draws its randomness (next tetromino, 2048 tile position, snake
//! food) through [`RandomSource`], so a game can be replayed deterministically
//! by injecting a fixed sequence.
//!
//! - [`SimpleRng`]: seeded LCG used in real play
//! - [`SequenceRng`]: replays a scripted sequence, used by tests

/// Uniform integer source injected into the engines
pub trait RandomSource {
    /// Return a value in `[0, bound)`. `bound` is always at least 1.
    fn next_int(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_int(&mut self, bound: u32) -> u32 {
        (**self).next_int(bound)
    }
}

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
        // LCG formula: (a * state + c) mod m, m = 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (enough to resume the exact sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        // The low bits of an LCG have short periods; take the high half.
        (self.next_u32() >> 16) % bound.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound, so a script can be
/// written in terms of the indices a test expects.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v % bound.max(1)
    }
}
