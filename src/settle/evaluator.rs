//! Per-margin settlement evaluation.
//!
//! Applies the decomposed line to the oriented margin and aggregates the
//! per-unit outcomes into a settlement status. The aggregation is the
//! exhaustive table in [`SettlementStatus::from_outcomes`], so no outcome
//! combination can fall through unclassified.

use rust_decimal::Decimal;

use crate::settle::splitter::split;
use crate::types::{Line, SettlementStatus, Side, Split, SubLine, UnitOutcome};

/// Settle one side's line against a canonical (A − B) margin.
///
/// For each sub-line `p` the test value is `margin + p` on side A and
/// `-margin + p` on side B; positive wins, negative loses, and an exact
/// zero pushes only on a whole sub-line.
pub fn evaluate_side(margin: i64, side: Side, line: Line) -> SettlementStatus {
    let oriented = Decimal::from(side.oriented(margin));

    let (first, second) = match split(line) {
        Split::Single(p) => (unit_outcome(oriented, p), None),
        Split::Halves(lo, hi) => (unit_outcome(oriented, lo), Some(unit_outcome(oriented, hi))),
    };

    SettlementStatus::from_outcomes(first, second)
}

/// Test one sub-line against an oriented margin.
fn unit_outcome(oriented_margin: Decimal, sub_line: SubLine) -> UnitOutcome {
    let test = oriented_margin + sub_line.value();
    if test > Decimal::ZERO {
        UnitOutcome::Win
    } else if test < Decimal::ZERO {
        UnitOutcome::Loss
    } else if sub_line.is_whole() {
        UnitOutcome::Push
    } else {
        // A non-whole line that lands exactly on zero cannot refund.
        UnitOutcome::Loss
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
