//! Shared types for the settlement engine.
//!
//! These types form the value model used across all modules. Everything
//! here is a plain value — nothing is persisted or mutated in place, so
//! the engine stays a pure function of its inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// A validated Asian Handicap line, e.g. -11.5, +0.75, -2.
///
/// Constructed only through [`Line::new`] or [`str::parse`], which enforce
/// that the fractional part of the absolute value is exactly .0, .25, .5
/// or .75. Everything downstream can therefore assume a well-formed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line(Decimal);

impl Line {
    /// Validate a decimal value as a handicap line.
    ///
    /// Off-grid fractional parts (e.g. -1.3) are rejected: the push rule
    /// is only defined for whole, half and quarter granularities.
    pub fn new(value: Decimal) -> Result<Self, SettleError> {
        let frac = value.abs().fract().normalize();
        if frac == Decimal::ZERO
            || frac == dec!(0.25)
            || frac == dec!(0.5)
            || frac == dec!(0.75)
        {
            Ok(Self(value.normalize()))
        } else {
            Err(SettleError::Granularity { value })
        }
    }

    /// The underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Granularity inferred from the fractional part.
    pub fn granularity(&self) -> Granularity {
        let frac = self.0.abs().fract().normalize();
        if frac == Decimal::ZERO {
            Granularity::Whole
        } else if frac == dec!(0.5) {
            Granularity::Half
        } else {
            Granularity::Quarter
        }
    }

    /// The mirrored line for the opposite side of a two-way market.
    pub fn mirrored(&self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locale-tolerant line parsing: trims and strips whitespace, accepts
/// comma or dot as the decimal separator and an optional leading `+`/`-`.
impl std::str::FromStr for Line {
    type Err = SettleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean: String = s.split_whitespace().collect::<String>().replace(',', ".");
        if clean.is_empty() || clean == "+" || clean == "-" {
            return Err(SettleError::Parse { input: s.to_string() });
        }
        let value: Decimal = clean
            .parse()
            .map_err(|_| SettleError::Parse { input: s.to_string() })?;
        Line::new(value)
    }
}

/// Line granularity, inferred from the fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Whole,
    Half,
    Quarter,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Whole => write!(f, "whole"),
            Granularity::Half => write!(f, "half"),
            Granularity::Quarter => write!(f, "quarter"),
        }
    }
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// One elementary line of a decomposition.
///
/// A whole or half line settles as a single sub-line at full stake; each
/// half of a quarter line carries half the stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubLine(pub Decimal);

impl SubLine {
    /// The sub-line value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether this sub-line can push (only whole lines can tie at zero).
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }
}

impl fmt::Display for SubLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decomposition of a line into its elementary sub-lines.
///
/// A line splits into exactly one or two sub-lines; encoding that as a
/// two-variant union makes any other cardinality unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Whole or half line — one sub-line at full stake.
    Single(SubLine),
    /// Quarter line — two neighboring sub-lines at half stake each.
    Halves(SubLine, SubLine),
}

impl Split {
    /// The sub-lines in order (length 1 or 2).
    pub fn sub_lines(&self) -> Vec<SubLine> {
        match self {
            Split::Single(p) => vec![*p],
            Split::Halves(lo, hi) => vec![*lo, *hi],
        }
    }

    /// Stake weight carried by each sub-line. Weights always sum to 1.
    pub fn unit_weight(&self) -> Decimal {
        match self {
            Split::Single(_) => Decimal::ONE,
            Split::Halves(_, _) => dec!(0.5),
        }
    }
}

// ---------------------------------------------------------------------------
// Sides & outcomes
// ---------------------------------------------------------------------------

/// The two sides of a handicap market. The canonical margin is always
/// (score of A − score of B); side B evaluates against its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Orient the canonical (A − B) margin for this side.
    pub fn oriented(&self, margin: i64) -> i64 {
        match self {
            Side::A => margin,
            Side::B => -margin,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = SettleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(Side::A),
            "b" => Ok(Side::B),
            _ => Err(SettleError::Side(s.to_string())),
        }
    }
}

/// The result of testing one sub-line against a margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOutcome {
    Win,
    Loss,
    Push,
}

impl UnitOutcome {
    /// All unit outcomes (useful for exhaustive enumeration).
    pub const ALL: &'static [UnitOutcome] =
        &[UnitOutcome::Win, UnitOutcome::Loss, UnitOutcome::Push];
}

impl fmt::Display for UnitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitOutcome::Win => write!(f, "win"),
            UnitOutcome::Loss => write!(f, "loss"),
            UnitOutcome::Push => write!(f, "push"),
        }
    }
}

/// Aggregate settlement status for one side of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementStatus {
    Win,
    HalfWin,
    Push,
    HalfLoss,
    Loss,
    /// One half wins and the other loses. Unreachable for standard
    /// granularities with integer margins, but the classification stays
    /// total rather than silently falling through.
    Mixed,
}

impl SettlementStatus {
    /// Total mapping from one or two unit outcomes to a settlement status.
    ///
    /// The match is exhaustive over all 3 single-outcome and 9 pair cases.
    pub fn from_outcomes(first: UnitOutcome, second: Option<UnitOutcome>) -> Self {
        use UnitOutcome::*;
        match (first, second) {
            (Win, None) => SettlementStatus::Win,
            (Loss, None) => SettlementStatus::Loss,
            (Push, None) => SettlementStatus::Push,
            (Win, Some(Win)) => SettlementStatus::Win,
            (Loss, Some(Loss)) => SettlementStatus::Loss,
            (Push, Some(Push)) => SettlementStatus::Push,
            (Win, Some(Push)) | (Push, Some(Win)) => SettlementStatus::HalfWin,
            (Loss, Some(Push)) | (Push, Some(Loss)) => SettlementStatus::HalfLoss,
            (Win, Some(Loss)) | (Loss, Some(Win)) => SettlementStatus::Mixed,
        }
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementStatus::Win => write!(f, "win"),
            SettlementStatus::HalfWin => write!(f, "half-win"),
            SettlementStatus::Push => write!(f, "push"),
            SettlementStatus::HalfLoss => write!(f, "half-loss"),
            SettlementStatus::Loss => write!(f, "loss"),
            SettlementStatus::Mixed => write!(f, "mixed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sweep output
// ---------------------------------------------------------------------------

/// Settlement of both sides at one integer margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginRow {
    pub margin: i64,
    pub side_a: SettlementStatus,
    pub side_b: SettlementStatus,
}

/// A closed margin interval over which both sides' statuses are constant.
/// Consecutive margins with an identical status pair merge into one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: i64,
    pub to: i64,
    pub side_a: SettlementStatus,
    pub side_b: SettlementStatus,
}

impl Segment {
    /// Number of integer margins covered by this segment.
    pub fn len(&self) -> i64 {
        self.to - self.from + 1
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}: A={} B={}", self.from, self.side_a, self.side_b)
        } else {
            write!(f, "{}..{}: A={} B={}", self.from, self.to, self.side_a, self.side_b)
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the settlement engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettleError {
    #[error("Unparseable line: {input:?}")]
    Parse { input: String },

    #[error("Unsupported line granularity: {value} (fractional part must be .0, .25, .5 or .75)")]
    Granularity { value: Decimal },

    #[error("Unknown side: {0:?} (expected \"a\" or \"b\")")]
    Side(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Line parsing --

    #[test]
    fn test_parse_dot_separator() {
        let line: Line = "-11.5".parse().unwrap();
        assert_eq!(line.value(), dec!(-11.5));
    }

    #[test]
    fn test_parse_comma_separator() {
        let line: Line = "-11,5".parse().unwrap();
        assert_eq!(line.value(), dec!(-11.5));
    }

    #[test]
    fn test_parse_leading_plus() {
        let line: Line = "+0,75".parse().unwrap();
        assert_eq!(line.value(), dec!(0.75));
    }

    #[test]
    fn test_parse_whitespace() {
        let line: Line = "  -1.25 ".parse().unwrap();
        assert_eq!(line.value(), dec!(-1.25));
        let line: Line = "- 1.25".parse().unwrap();
        assert_eq!(line.value(), dec!(-1.25));
    }

    #[test]
    fn test_parse_integer_line() {
        let line: Line = "-2".parse().unwrap();
        assert_eq!(line.value(), dec!(-2));
        assert_eq!(line.granularity(), Granularity::Whole);
    }

    #[test]
    fn test_parse_rejects_empty_and_bare_signs() {
        assert!("".parse::<Line>().is_err());
        assert!("   ".parse::<Line>().is_err());
        assert!("+".parse::<Line>().is_err());
        assert!("-".parse::<Line>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<Line>().is_err());
        assert!("1.2.3".parse::<Line>().is_err());
        assert!("--1".parse::<Line>().is_err());
    }

    #[test]
    fn test_parse_rejects_off_grid_fraction() {
        let err = "-1.3".parse::<Line>().unwrap_err();
        assert!(matches!(err, SettleError::Granularity { .. }));
        assert!("0.1".parse::<Line>().is_err());
        assert!("2.125".parse::<Line>().is_err());
    }

    #[test]
    fn test_new_accepts_all_grid_fractions() {
        for v in [dec!(0), dec!(0.25), dec!(-0.5), dec!(1.75), dec!(-11.5), dec!(3)] {
            assert!(Line::new(v).is_ok(), "expected {v} to be a valid line");
        }
    }

    #[test]
    fn test_granularity_inference() {
        assert_eq!("-2".parse::<Line>().unwrap().granularity(), Granularity::Whole);
        assert_eq!("0.5".parse::<Line>().unwrap().granularity(), Granularity::Half);
        assert_eq!("-1.25".parse::<Line>().unwrap().granularity(), Granularity::Quarter);
        assert_eq!("+0.75".parse::<Line>().unwrap().granularity(), Granularity::Quarter);
    }

    #[test]
    fn test_line_mirrored() {
        let line: Line = "-1.25".parse().unwrap();
        assert_eq!(line.mirrored().value(), dec!(1.25));
    }

    #[test]
    fn test_line_display() {
        assert_eq!(format!("{}", "-11,5".parse::<Line>().unwrap()), "-11.5");
    }

    #[test]
    fn test_line_serialization_roundtrip() {
        let line: Line = "-1.25".parse().unwrap();
        let json = serde_json::to_string(&line).unwrap();
        let parsed: Line = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, line);
    }

    // -- SubLine --

    #[test]
    fn test_sub_line_is_whole() {
        assert!(SubLine(dec!(-1)).is_whole());
        assert!(SubLine(dec!(0)).is_whole());
        assert!(!SubLine(dec!(-1.5)).is_whole());
        assert!(!SubLine(dec!(0.5)).is_whole());
    }

    // -- Split --

    #[test]
    fn test_split_weights_sum_to_one() {
        let single = Split::Single(SubLine(dec!(-2)));
        let halves = Split::Halves(SubLine(dec!(-1)), SubLine(dec!(-1.5)));
        for split in [single, halves] {
            let total: Decimal = split
                .sub_lines()
                .iter()
                .map(|_| split.unit_weight())
                .sum();
            assert_eq!(total, Decimal::ONE);
        }
    }

    // -- Side --

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::A.opposite(), Side::B);
        assert_eq!(Side::B.opposite(), Side::A);
    }

    #[test]
    fn test_side_oriented() {
        assert_eq!(Side::A.oriented(7), 7);
        assert_eq!(Side::B.oriented(7), -7);
        assert_eq!(Side::B.oriented(-3), 3);
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("a".parse::<Side>().unwrap(), Side::A);
        assert_eq!(" B ".parse::<Side>().unwrap(), Side::B);
        assert!("c".parse::<Side>().is_err());
    }

    // -- Status classification --

    #[test]
    fn test_single_outcome_classification() {
        use UnitOutcome::*;
        assert_eq!(SettlementStatus::from_outcomes(Win, None), SettlementStatus::Win);
        assert_eq!(SettlementStatus::from_outcomes(Loss, None), SettlementStatus::Loss);
        assert_eq!(SettlementStatus::from_outcomes(Push, None), SettlementStatus::Push);
    }

    #[test]
    fn test_pair_outcome_classification_exhaustive() {
        use SettlementStatus as S;
        use UnitOutcome::*;
        let expected = [
            ((Win, Win), S::Win),
            ((Loss, Loss), S::Loss),
            ((Push, Push), S::Push),
            ((Win, Push), S::HalfWin),
            ((Push, Win), S::HalfWin),
            ((Loss, Push), S::HalfLoss),
            ((Push, Loss), S::HalfLoss),
            ((Win, Loss), S::Mixed),
            ((Loss, Win), S::Mixed),
        ];
        assert_eq!(expected.len(), 9);
        for ((a, b), want) in expected {
            assert_eq!(
                SettlementStatus::from_outcomes(a, Some(b)),
                want,
                "({a}, {b}) must map to {want}"
            );
        }
    }

    #[test]
    fn test_classification_covers_all_pairs() {
        // Every combination of the 3 unit outcomes must classify without
        // panicking — 9 pairs plus 3 singles.
        let mut seen = 0;
        for &a in UnitOutcome::ALL {
            let _ = SettlementStatus::from_outcomes(a, None);
            seen += 1;
            for &b in UnitOutcome::ALL {
                let _ = SettlementStatus::from_outcomes(a, Some(b));
                seen += 1;
            }
        }
        assert_eq!(seen, 12);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", SettlementStatus::HalfWin), "half-win");
        assert_eq!(format!("{}", SettlementStatus::Mixed), "mixed");
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&SettlementStatus::HalfLoss).unwrap(), "\"half-loss\"");
        assert_eq!(serde_json::to_string(&SettlementStatus::Win).unwrap(), "\"win\"");
        let parsed: SettlementStatus = serde_json::from_str("\"half-win\"").unwrap();
        assert_eq!(parsed, SettlementStatus::HalfWin);
    }

    // -- Segment --

    #[test]
    fn test_segment_len() {
        let seg = Segment {
            from: -3,
            to: 2,
            side_a: SettlementStatus::Win,
            side_b: SettlementStatus::Loss,
        };
        assert_eq!(seg.len(), 6);
    }

    #[test]
    fn test_segment_display() {
        let seg = Segment {
            from: 1,
            to: 1,
            side_a: SettlementStatus::Push,
            side_b: SettlementStatus::Push,
        };
        assert_eq!(format!("{seg}"), "1: A=push B=push");

        let seg = Segment { from: -2, to: 4, ..seg };
        assert_eq!(format!("{seg}"), "-2..4: A=push B=push");
    }

    #[test]
    fn test_segment_serialization_roundtrip() {
        let seg = Segment {
            from: -5,
            to: 5,
            side_a: SettlementStatus::HalfWin,
            side_b: SettlementStatus::HalfLoss,
        };
        let json = serde_json::to_string(&seg).unwrap();
        assert!(json.contains("half-win"));
        let parsed: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seg);
    }

    // -- SettleError --

    #[test]
    fn test_error_display() {
        let e = SettleError::Parse { input: "abc".to_string() };
        assert_eq!(format!("{e}"), "Unparseable line: \"abc\"");

        let e = SettleError::Granularity { value: dec!(1.3) };
        assert!(format!("{e}").contains("1.3"));
    }
}
