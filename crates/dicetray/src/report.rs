// ABOUTME: Summary statistics and display-line rendering for roll outcomes.
// ABOUTME: Produces the header, the annotation tree, and the sum/mean lines.

use std::fmt;

use crate::constraints::Constraints;
use crate::notation::RollSpec;
use crate::roller::Outcome;

/// Number of roll values shown before the remainder is suppressed.
pub const DISPLAY_CAP: usize = 20;

const MEDIAL_CONNECTOR: &str = " ├─>";
const TERMINAL_CONNECTOR: &str = " └─>";

/// The rendered view of one completed roll: the final values plus the
/// bookkeeping the display lines need.
#[derive(Debug, Clone)]
pub struct Report {
    spec: RollSpec,
    rolls: Vec<i64>,
    generated: usize,
    rerolls: usize,
    exploding: bool,
    survivors: Option<usize>,
}

impl Report {
    pub fn new(spec: RollSpec, constraints: &Constraints, outcome: Outcome) -> Self {
        Self {
            spec,
            exploding: constraints.exploding(),
            rolls: outcome.rolls,
            generated: outcome.generated,
            rerolls: outcome.rerolls,
            survivors: outcome.survivors,
        }
    }

    /// The dice specification this roll used.
    pub fn spec(&self) -> &RollSpec {
        &self.spec
    }

    /// Final roll values, every constraint applied.
    pub fn rolls(&self) -> &[i64] {
        &self.rolls
    }

    /// Total dice produced, explosion rerolls included.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Number of extra rolls granted by explosions.
    pub fn rerolls(&self) -> usize {
        self.rerolls
    }

    /// Count of rolls that passed the bound filter, when a bound was active.
    pub fn survivors(&self) -> Option<usize> {
        self.survivors
    }

    /// Size of the final roll set.
    pub fn total(&self) -> usize {
        self.rolls.len()
    }

    /// How many values the display shows.
    pub fn displayed(&self) -> usize {
        self.total().min(DISPLAY_CAP)
    }

    /// Whether the display had to drop values beyond the cap.
    pub fn truncated(&self) -> bool {
        self.total() > DISPLAY_CAP
    }

    /// Sum of the final roll set, absent when the set is empty.
    pub fn sum(&self) -> Option<i64> {
        (!self.rolls.is_empty()).then(|| self.rolls.iter().sum())
    }

    /// Mean of the final roll set, absent when the set is empty.
    pub fn mean(&self) -> Option<f64> {
        self.sum().map(|sum| sum as f64 / self.total() as f64)
    }

    /// Render the display lines in order: header, optional suppressed-count,
    /// explosion, and bound-survivor annotations, then sum/mean.
    ///
    /// The annotation lines carry tree connectors; which ones fire is
    /// decided up front so each can tell whether another still follows.
    /// Sum/mean never carry a connector and never count as followers.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.header()];

        let suppressed = self.truncated();
        let explosion = self.exploding;
        let bounds = self.survivors.is_some();

        if suppressed {
            let connector = if explosion || bounds {
                MEDIAL_CONNECTOR
            } else {
                TERMINAL_CONNECTOR
            };
            let hidden = self.total() - DISPLAY_CAP;
            lines.push(format!("{}(+{} suppressed roll(s))...", connector, hidden));
        }

        if explosion {
            let connector = if bounds {
                MEDIAL_CONNECTOR
            } else {
                TERMINAL_CONNECTOR
            };
            if self.rerolls > 0 {
                lines.push(format!(
                    "{}***Bang!*** {} roll(s) exploded into additional rolls!",
                    connector, self.rerolls
                ));
            } else {
                lines.push(format!(
                    "{}*Fizzle...* {} roll(s) exploded into additional rolls...",
                    connector, self.rerolls
                ));
            }
        }

        if let Some(survivors) = self.survivors {
            lines.push(format!(
                "{}{} total success(es)! (within specified min/max)",
                TERMINAL_CONNECTOR, survivors
            ));
        }

        if self.total() > 1 {
            if let (Some(sum), Some(mean)) = (self.sum(), self.mean()) {
                lines.push(format!("Sum: {}", sum));
                lines.push(format!("Mean: {:.2}", mean));
            }
        }

        lines
    }

    fn header(&self) -> String {
        // The modifier sign is always printed, "+0" included.
        let modifier = if self.spec.modifier >= 0 {
            format!("+{}", self.spec.modifier)
        } else {
            self.spec.modifier.to_string()
        };
        let header = format!(
            "Rolling {}d{}{}:",
            self.spec.count, self.spec.sides, modifier
        );

        let shown: Vec<String> = self.rolls[..self.displayed()]
            .iter()
            .map(i64::to_string)
            .collect();
        if shown.is_empty() {
            header
        } else {
            format!("{} {}", header, shown.join(", "))
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
