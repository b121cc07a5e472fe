// ABOUTME: Roll generation and the constraint pipeline stages.
// ABOUTME: Explosions, bound filtering, and keep-extreme selection over roll sets.

use crate::constraints::Constraints;
use crate::notation::RollSpec;

/// Trait for random number generation, allowing for testing with fixed values.
pub trait Rng {
    /// Generate a random number in the range [1, max].
    fn roll(&mut self, max: u32) -> u32;
}

/// Default RNG using fastrand.
pub struct FastRng(fastrand::Rng);

impl FastRng {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for FastRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng for FastRng {
    fn roll(&mut self, max: u32) -> u32 {
        self.0.u32(1..=max)
    }
}

/// Result of running one roll through the whole constraint pipeline.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Final roll values, every constraint applied.
    pub rolls: Vec<i64>,
    /// Total count of dice produced, explosion rerolls included.
    pub generated: usize,
    /// Number of extra rolls granted by explosions.
    pub rerolls: usize,
    /// Count left after the bound filter, when a bound was active.
    pub survivors: Option<usize>,
}

/// Run the full pipeline: generate, explode, bound-filter, select.
///
/// Every stage takes the previous stage's sequence and returns a fresh one;
/// no stage can fail once the constraints parsed.
pub fn resolve(spec: &RollSpec, constraints: &Constraints, rng: &mut impl Rng) -> Outcome {
    let base = generate(spec, rng);
    let exploded = explode(&base, spec, constraints, rng);
    let rerolls = exploded.len() - base.len();
    let generated = exploded.len();
    let bounded = bound_filter(&exploded, constraints);
    let survivors = constraints.bounded().then(|| bounded.len());
    let rolls = select(&bounded, constraints);

    Outcome {
        rolls,
        generated,
        rerolls,
        survivors,
    }
}

/// Produce exactly `spec.count` independent rolls, each uniform in
/// `[1, sides]` plus the modifier. A zero count yields the empty set.
pub fn generate(spec: &RollSpec, rng: &mut impl Rng) -> Vec<i64> {
    (0..spec.count).map(|_| roll_die(spec, rng)).collect()
}

fn roll_die(spec: &RollSpec, rng: &mut impl Rng) -> i64 {
    i64::from(rng.roll(spec.sides)) + spec.modifier
}

/// Append one extra roll for every base roll matching a present explode
/// condition. Only the original rolls are examined, so explosions never
/// cascade.
pub fn explode(
    rolls: &[i64],
    spec: &RollSpec,
    constraints: &Constraints,
    rng: &mut impl Rng,
) -> Vec<i64> {
    let extra = rolls.iter().filter(|&&v| constraints.explodes(v)).count();
    let mut out = rolls.to_vec();
    out.extend((0..extra).map(|_| roll_die(spec, rng)));
    out
}

/// Keep the rolls satisfying the at-least/at-most bounds.
///
/// With both bounds present and inverted (at-least > at-most) the closed
/// interval between them is degenerate, so the filter keeps the union of
/// the two tails instead: everything outside the open interval. The result
/// is sorted ascending; when every element is dropped it stays empty, with
/// no fallback to the unfiltered set. Without bounds this is a no-op.
pub fn bound_filter(rolls: &[i64], constraints: &Constraints) -> Vec<i64> {
    let mut kept: Vec<i64> = match (constraints.at_least, constraints.at_most) {
        (None, None) => return rolls.to_vec(),
        (Some(lo), Some(hi)) if lo <= hi => {
            rolls.iter().copied().filter(|&v| lo <= v && v <= hi).collect()
        }
        (Some(lo), Some(hi)) => rolls.iter().copied().filter(|&v| v <= hi || v >= lo).collect(),
        (Some(lo), None) => rolls.iter().copied().filter(|&v| v >= lo).collect(),
        (None, Some(hi)) => rolls.iter().copied().filter(|&v| v <= hi).collect(),
    };
    kept.sort_unstable();
    kept
}

/// Keep the lowest and/or highest extremes of the set, as a union.
///
/// The input is re-sorted ascending before slicing, so the extremes are
/// well defined even when no bound filter ran. Keep-lowest claims the first
/// `min(size, n)` elements. Keep-highest takes a suffix of its full
/// `min(size, n)` window when that window is disjoint from the claimed
/// prefix; when the windows overlap, the slots keep-lowest already used are
/// surrendered, clamping at zero. No element is ever included twice.
pub fn select(rolls: &[i64], constraints: &Constraints) -> Vec<i64> {
    let keep_lowest = constraints.keep_lowest.filter(|&n| n > 0);
    let keep_highest = constraints.keep_highest.filter(|&n| n > 0);
    if keep_lowest.is_none() && keep_highest.is_none() {
        return rolls.to_vec();
    }

    let mut sorted = rolls.to_vec();
    sorted.sort_unstable();
    let size = sorted.len();

    let taken = keep_lowest.map_or(0, |n| size.min(n as usize));
    let mut out = sorted[..taken].to_vec();

    if let Some(n) = keep_highest {
        let window = size.min(n as usize);
        let extra = if taken + window <= size {
            window
        } else {
            window.saturating_sub(taken)
        };
        out.extend_from_slice(&sorted[size - extra..]);
    }

    out
}
