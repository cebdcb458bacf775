//! Quarter-line decomposition.
//!
//! A .25 or .75 line settles as two half-stake bets on the neighboring
//! whole/half lines; whole and half lines settle as themselves. All
//! arithmetic is exact `Decimal` — no epsilon comparisons.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Line, Split, SubLine};

/// Decompose a line into its elementary sub-lines.
///
/// Magnitude arithmetic runs on the absolute value and the original sign
/// is reapplied to both neighbors, so -1.25 splits into [-1, -1.5] and
/// never into a mix of signs.
pub fn split(line: Line) -> Split {
    let value = line.value();
    let sign = if value.is_sign_negative() {
        Decimal::NEGATIVE_ONE
    } else {
        Decimal::ONE
    };
    let abs = value.abs();
    let base = abs.trunc();
    let frac = abs.fract().normalize();

    if frac == dec!(0.25) {
        Split::Halves(
            SubLine((sign * base).normalize()),
            SubLine((sign * (base + dec!(0.5))).normalize()),
        )
    } else if frac == dec!(0.75) {
        Split::Halves(
            SubLine((sign * (base + dec!(0.5))).normalize()),
            SubLine((sign * (base + Decimal::ONE)).normalize()),
        )
    } else {
        // Whole or half line — Line validation guarantees the fractional
        // part is 0 or .5 here.
        Split::Single(SubLine(value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> Line {
        s.parse().unwrap()
    }

    #[test]
    fn test_whole_line_is_single() {
        assert_eq!(split(line("-2")), Split::Single(SubLine(dec!(-2))));
        assert_eq!(split(line("0")), Split::Single(SubLine(dec!(0))));
        assert_eq!(split(line("+3")), Split::Single(SubLine(dec!(3))));
    }

    #[test]
    fn test_half_line_is_single() {
        assert_eq!(split(line("-11.5")), Split::Single(SubLine(dec!(-11.5))));
        assert_eq!(split(line("0.5")), Split::Single(SubLine(dec!(0.5))));
    }

    #[test]
    fn test_quarter_25_splits_down() {
        assert_eq!(
            split(line("-1.25")),
            Split::Halves(SubLine(dec!(-1)), SubLine(dec!(-1.5)))
        );
        assert_eq!(
            split(line("2.25")),
            Split::Halves(SubLine(dec!(2)), SubLine(dec!(2.5)))
        );
    }

    #[test]
    fn test_quarter_75_splits_up() {
        assert_eq!(
            split(line("-0.75")),
            Split::Halves(SubLine(dec!(-0.5)), SubLine(dec!(-1)))
        );
        assert_eq!(
            split(line("+0.75")),
            Split::Halves(SubLine(dec!(0.5)), SubLine(dec!(1)))
        );
    }

    #[test]
    fn test_quarter_near_zero() {
        assert_eq!(
            split(line("0.25")),
            Split::Halves(SubLine(dec!(0)), SubLine(dec!(0.5)))
        );
        assert_eq!(
            split(line("-0.25")),
            Split::Halves(SubLine(dec!(0)), SubLine(dec!(-0.5)))
        );
    }

    #[test]
    fn test_split_preserves_sign() {
        for s in ["-1.25", "-0.75", "-7.25", "-10.75"] {
            if let Split::Halves(lo, hi) = split(line(s)) {
                assert!(lo.value() <= Decimal::ZERO, "{s}: lo must not be positive");
                assert!(hi.value() < Decimal::ZERO, "{s}: hi must be negative");
            } else {
                panic!("{s} must split into halves");
            }
        }
    }

    #[test]
    fn test_halves_differ_by_half_and_average_to_line() {
        for s in ["-1.25", "-0.75", "0.25", "3.75", "-12.25", "+9.75"] {
            let l = line(s);
            match split(l) {
                Split::Halves(lo, hi) => {
                    assert_eq!((hi.value() - lo.value()).abs(), dec!(0.5), "{s}");
                    assert_eq!((lo.value() + hi.value()) / dec!(2), l.value(), "{s}");
                }
                Split::Single(_) => panic!("{s} must split into halves"),
            }
        }
    }

    #[test]
    fn test_whole_and_half_lines_return_input() {
        for s in ["-3", "0", "4", "-0.5", "11.5", "-11.5"] {
            let l = line(s);
            assert_eq!(split(l), Split::Single(SubLine(l.value())), "{s}");
        }
    }

    #[test]
    fn test_split_is_deterministic() {
        let l = line("-1.75");
        assert_eq!(split(l), split(l));
    }
}
