// ABOUTME: Core library for the dicetray chat-style dice roll engine.
// ABOUTME: Parses notation and option flags, rolls with constraints, and renders reports.

//! # Dicetray
//!
//! A dice roll engine driven by chat-style argument lists: free-form dice
//! notation plus long-form option flags, evaluated through a fixed pipeline
//! of generation, explosions, bound filtering, and extreme selection.
//!
//! ## Quick Start
//!
//! ```
//! // 3d8+1, keeping only the two highest rolls
//! let report = dicetray::roll(["3d8+1", "--use-highest", "2"]).unwrap();
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! ```
//!
//! ## Supported arguments
//!
//! - Dice notation: `2d6`, `3d8+1`, `d20-2` (defaults to `1d6`)
//! - `--at-least N` / `--at-most N`: only use rolls within the bounds
//! - `--use-highest N` / `--use-lowest N`: only use the extreme rolls
//! - `--explode-at N` / `--explode-above N` / `--explode-below N`:
//!   one bonus roll per matching result
//! - `--help` / `-h`: usage listing

pub mod constraints;
pub mod error;
pub mod notation;
pub mod report;
pub mod roller;

pub use constraints::Constraints;
pub use error::{Error, Result};
pub use notation::RollSpec;
pub use report::{Report, DISPLAY_CAP};
pub use roller::{FastRng, Outcome, Rng};

/// Parse and roll a chat-style argument list in one step.
///
/// # Examples
///
/// ```
/// let report = dicetray::roll(["2d6"]).unwrap();
/// assert_eq!(report.total(), 2);
/// ```
pub fn roll<I, S>(tokens: I) -> Result<Report>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    roll_with_rng(tokens, &mut FastRng::new())
}

/// Parse and roll with a custom RNG.
///
/// Useful for testing or when you need reproducible results.
///
/// # Examples
///
/// ```
/// use dicetray::FastRng;
///
/// let mut rng = FastRng::with_seed(42);
/// let report = dicetray::roll_with_rng(["2d6"], &mut rng).unwrap();
/// ```
pub fn roll_with_rng<I, S>(tokens: I, rng: &mut impl Rng) -> Result<Report>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_owned()).collect();
    let spec = RollSpec::parse(&tokens);
    let constraints = Constraints::parse(&tokens)?;
    let outcome = roller::resolve(&spec, &constraints, rng);
    Ok(Report::new(spec, &constraints, outcome))
}
