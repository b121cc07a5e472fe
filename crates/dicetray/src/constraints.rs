// ABOUTME: Flag-style constraint parsing for roll commands.
// ABOUTME: Seven independent optional limits covering bounds, keeps, and explosions.

use clap::error::ErrorKind;
use clap::Parser;

use crate::error::{Error, Result};

/// The optional constraints a roll command may carry.
///
/// Every field is independent; absence means "no constraint of this kind".
/// Zero is a real value, not a sentinel. The set is read-only once parsed:
/// the pipeline stages only ever inspect it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Only use rolls that are `>= N`.
    pub at_least: Option<i64>,
    /// Only use rolls that are `<= N`.
    pub at_most: Option<i64>,
    /// Only use the `N` highest rolls.
    pub keep_highest: Option<i64>,
    /// Only use the `N` lowest rolls.
    pub keep_lowest: Option<i64>,
    /// Grant an extra roll for each result `= N`.
    pub explode_at: Option<i64>,
    /// Grant an extra roll for each result `>= N`.
    pub explode_above: Option<i64>,
    /// Grant an extra roll for each result `<= N`.
    pub explode_below: Option<i64>,
}

impl Constraints {
    /// Parse a chat-style token sequence into a constraint set.
    ///
    /// Bare words (dice notation, noise) are absorbed without complaint;
    /// only the long-form flags are interpreted here. `--help`/`-h`
    /// short-circuits with the rendered usage listing, and unknown flags or
    /// non-integer arguments short-circuit with the rendered error. Either
    /// way no roll happens.
    pub fn parse<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match RollArgs::try_parse_from(tokens.into_iter().map(|t| t.as_ref().to_owned())) {
            Ok(args) => Ok(args.into()),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp => Err(Error::Help(err.render().to_string())),
                _ => Err(Error::InvalidArgs(err.render().to_string())),
            },
        }
    }

    /// Whether either bound is present.
    pub fn bounded(&self) -> bool {
        self.at_least.is_some() || self.at_most.is_some()
    }

    /// Whether any explode condition is present.
    pub fn exploding(&self) -> bool {
        self.explode_at.is_some() || self.explode_above.is_some() || self.explode_below.is_some()
    }

    /// Whether any present explode condition matches `value`. A value
    /// matching several conditions still only matches once.
    pub fn explodes(&self, value: i64) -> bool {
        self.explode_at.is_some_and(|at| value == at)
            || self.explode_above.is_some_and(|above| value >= above)
            || self.explode_below.is_some_and(|below| value <= below)
    }
}

/// Rolls `n` independent `k`-sided dice with per-die modifier `r` and
/// reports the results with related stats.
#[derive(Debug, Parser)]
#[command(
    name = "roll",
    no_binary_name = true,
    about = "Rolls n independent k-sided dice with a per-die modifier, \
             and returns a list of results with related stats",
    after_help = "Options generally combine additively (i.e. using both \
                  --use-highest and --use-lowest will include both extremes)."
)]
struct RollArgs {
    /// Dice notation such as `2d6` or `3d8+1` (defaults to 1d6)
    #[arg(value_name = "NOTATION")]
    notation: Vec<String>,

    /// Only uses rolls that are >= N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    at_least: Option<i64>,

    /// Only uses rolls that are <= N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    at_most: Option<i64>,

    /// Only uses the N highest rolls
    #[arg(long = "use-highest", value_name = "N", allow_negative_numbers = true)]
    use_highest: Option<i64>,

    /// Only uses the N lowest rolls
    #[arg(long = "use-lowest", value_name = "N", allow_negative_numbers = true)]
    use_lowest: Option<i64>,

    /// Performs additional rolls for each result = N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    explode_at: Option<i64>,

    /// Performs additional rolls for each result >= N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    explode_above: Option<i64>,

    /// Performs additional rolls for each result <= N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    explode_below: Option<i64>,
}

impl From<RollArgs> for Constraints {
    fn from(args: RollArgs) -> Self {
        Self {
            at_least: args.at_least,
            at_most: args.at_most,
            keep_highest: args.use_highest,
            keep_lowest: args.use_lowest,
            explode_at: args.explode_at,
            explode_above: args.explode_above,
            explode_below: args.explode_below,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_leaves_everything_absent() {
        let constraints = Constraints::parse::<_, &str>([]).unwrap();
        assert_eq!(constraints, Constraints::default());
        assert!(!constraints.bounded());
        assert!(!constraints.exploding());
    }

    #[test]
    fn test_parse_notation_tokens_are_absorbed() {
        let constraints = Constraints::parse(["2d6", "extra"]).unwrap();
        assert_eq!(constraints, Constraints::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let constraints = Constraints::parse([
            "--at-least",
            "2",
            "--at-most",
            "5",
            "--use-highest",
            "3",
            "--use-lowest",
            "1",
            "--explode-at",
            "6",
            "--explode-above",
            "5",
            "--explode-below",
            "1",
        ])
        .unwrap();
        assert_eq!(constraints.at_least, Some(2));
        assert_eq!(constraints.at_most, Some(5));
        assert_eq!(constraints.keep_highest, Some(3));
        assert_eq!(constraints.keep_lowest, Some(1));
        assert_eq!(constraints.explode_at, Some(6));
        assert_eq!(constraints.explode_above, Some(5));
        assert_eq!(constraints.explode_below, Some(1));
    }

    #[test]
    fn test_parse_negative_and_zero_arguments() {
        let constraints =
            Constraints::parse(["--at-least", "-3", "--use-highest", "0"]).unwrap();
        assert_eq!(constraints.at_least, Some(-3));
        // Zero is present, not absent.
        assert_eq!(constraints.keep_highest, Some(0));
    }

    #[test]
    fn test_parse_mixed_with_notation() {
        let constraints = Constraints::parse(["3d8+1", "--explode-at", "9"]).unwrap();
        assert_eq!(constraints.explode_at, Some(9));
        assert!(constraints.exploding());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Constraints::parse(["--frobnicate", "1"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));
    }

    #[test]
    fn test_non_integer_argument_is_rejected() {
        let err = Constraints::parse(["--at-least", "lots"]).unwrap_err();
        match err {
            Error::InvalidArgs(message) => assert!(message.contains("lots")),
            other => panic!("expected InvalidArgs, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let err = Constraints::parse(["--at-most"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));
    }

    #[test]
    fn test_help_short_circuits_with_usage() {
        for flag in ["--help", "-h"] {
            let err = Constraints::parse([flag]).unwrap_err();
            match err {
                Error::Help(usage) => {
                    assert!(usage.contains("Usage"));
                    assert!(usage.contains("--at-least"));
                    assert!(usage.contains("--explode-below"));
                }
                other => panic!("expected Help, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_explodes_checks_every_present_condition() {
        let constraints = Constraints {
            explode_at: Some(4),
            explode_above: Some(9),
            explode_below: Some(1),
            ..Constraints::default()
        };
        assert!(constraints.explodes(4));
        assert!(constraints.explodes(9));
        assert!(constraints.explodes(10));
        assert!(constraints.explodes(1));
        assert!(constraints.explodes(0));
        assert!(!constraints.explodes(5));
    }

    #[test]
    fn test_explodes_is_false_without_conditions() {
        assert!(!Constraints::default().explodes(6));
    }
}
