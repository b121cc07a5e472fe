// ABOUTME: Dice notation scanning for tokens like "3d8+2".
// ABOUTME: Builds a RollSpec by merging per-token field patches left to right.

/// A dice roll specification: how many dice, how many sides, and a flat
/// per-die modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSpec {
    /// Number of dice to roll.
    pub count: u32,
    /// Number of sides per die.
    pub sides: u32,
    /// Flat modifier added to every die.
    pub modifier: i64,
}

impl Default for RollSpec {
    fn default() -> Self {
        Self {
            count: 1,
            sides: 6,
            modifier: 0,
        }
    }
}

impl RollSpec {
    /// Scan tokens in order and merge every dice-notation match onto the
    /// default `1d6+0` spec.
    ///
    /// Each matching token supplies a patch of the fields it mentions;
    /// fields it leaves out keep their current value rather than resetting,
    /// so `"2d6"` followed by `"d20"` yields `2d20`. Tokens without a match
    /// are ignored and never raise an error.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = Self::default();
        for token in tokens {
            if let Some(patch) = Patch::scan(token.as_ref().trim()) {
                spec.apply(patch);
            }
        }
        spec
    }

    fn apply(&mut self, patch: Patch) {
        if let Some(count) = patch.count {
            self.count = count;
        }
        self.sides = patch.sides;
        if let Some(modifier) = patch.modifier {
            self.modifier = modifier;
        }
    }
}

/// The fields one token supplies. A match always carries the sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Patch {
    count: Option<u32>,
    sides: u32,
    modifier: Option<i64>,
}

impl Patch {
    /// Find the leftmost `[count]d<sides>[(+|-)modifier]` match inside
    /// `token`. The pattern is unanchored, so `"xx2d4+1yy"` matches `2d4+1`.
    /// A zero-sided match disqualifies the whole token.
    fn scan(token: &str) -> Option<Self> {
        let bytes = token.as_bytes();

        for (i, &b) in bytes.iter().enumerate() {
            if b != b'd' {
                continue;
            }

            // Sides are mandatory: at least one digit right after the 'd'.
            let mut j = i + 1;
            let mut sides: u32 = 0;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                sides = sides
                    .saturating_mul(10)
                    .saturating_add(u32::from(bytes[j] - b'0'));
                j += 1;
            }
            if j == i + 1 {
                continue;
            }
            if sides == 0 {
                return None;
            }

            // Optional count: the maximal digit run ending right before 'd'.
            let mut k = i;
            while k > 0 && bytes[k - 1].is_ascii_digit() {
                k -= 1;
            }
            let count = (k < i).then(|| digits_u32(&bytes[k..i]));

            // Optional signed modifier immediately after the sides.
            let modifier = match bytes.get(j).copied() {
                Some(sign @ (b'+' | b'-')) => {
                    let digits = bytes[j + 1..]
                        .iter()
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    if digits == 0 {
                        None
                    } else {
                        let value = digits_i64(&bytes[j + 1..j + 1 + digits]);
                        Some(if sign == b'-' { -value } else { value })
                    }
                }
                _ => None,
            };

            return Some(Self {
                count,
                sides,
                modifier,
            });
        }

        None
    }
}

fn digits_u32(digits: &[u8]) -> u32 {
    digits.iter().fold(0u32, |acc, &d| {
        acc.saturating_mul(10).saturating_add(u32::from(d - b'0'))
    })
}

fn digits_i64(digits: &[u8]) -> i64 {
    digits.iter().fold(0i64, |acc, &d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    })
}
