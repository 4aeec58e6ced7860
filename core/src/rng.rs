//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through PhaseRng instances derived
//! from the single seed handed to the engine.
//!
//! Each phase gets its own RNG stream, seeded deterministically
//! from (seed XOR phase_index). This means:
//!   - Adding a new phase never changes existing phases' streams.
//!   - Each phase's stream is fully reproducible in isolation.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single phase of roster generation.
pub struct PhaseRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl PhaseRng {
    /// Create a phase RNG from the run seed and a stable phase index.
    /// The index must never change once assigned.
    pub fn new(seed: u64, phase_index: u64) -> Self {
        let derived_seed = seed ^ (phase_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Uniform pick of one element. `None` only for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Uniform sample of `k` distinct positions, without replacement.
    /// Returns fewer than `k` elements only when `items` is shorter than `k`.
    pub fn sample<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.inner, k)
            .cloned()
            .collect()
    }
}

/// All phase RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    seed: u64,
}

impl RngBank {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn for_phase(&self, slot: PhaseSlot) -> PhaseRng {
        PhaseRng::new(self.seed, slot as u64).with_name(slot.name())
    }
}

/// Stable phase slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every phase's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum PhaseSlot {
    Breaks = 0,
    SlotAssignment = 1,
    TenMinuteBreaks = 2,
}

impl PhaseSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Breaks => "breaks",
            Self::SlotAssignment => "slot_assignment",
            Self::TenMinuteBreaks => "ten_minute_breaks",
        }
    }
}
