//! Margin-range sweep and segment compression.
//!
//! Sweeps a window of integer margins around the lines' change points,
//! settles both sides at each margin, and run-length-encodes consecutive
//! margins that share a status pair into closed segments.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::settle::evaluator::evaluate_side;
use crate::settle::splitter::split;
use crate::types::{Line, MarginRow, Segment, Side};

/// Half-width of the sweep window.
///
/// Either side's status can only change where a sub-line test crosses
/// zero: at `-p` for side A's sub-lines and `+p` for side B's. The bound
/// is the ceiling of the largest such threshold magnitude (zero included)
/// plus the caller's padding.
pub fn window_bound(line_a: Line, line_b: Line, padding: u32) -> i64 {
    let mut max_abs = Decimal::ZERO;
    for p in split(line_a).sub_lines() {
        max_abs = max_abs.max(p.value().abs());
    }
    for p in split(line_b).sub_lines() {
        max_abs = max_abs.max(p.value().abs());
    }
    max_abs.ceil().to_i64().unwrap_or(0) + i64::from(padding)
}

/// Settle both sides at every integer margin in `[-bound, bound]`.
pub fn margin_table(line_a: Line, line_b: Line, padding: u32) -> Vec<MarginRow> {
    let bound = window_bound(line_a, line_b, padding);
    (-bound..=bound)
        .map(|margin| MarginRow {
            margin,
            side_a: evaluate_side(margin, Side::A, line_a),
            side_b: evaluate_side(margin, Side::B, line_b),
        })
        .collect()
}

/// Sweep the window and compress it into outcome segments.
pub fn sweep(line_a: Line, line_b: Line, padding: u32) -> Vec<Segment> {
    segments_from_rows(&margin_table(line_a, line_b, padding))
}

/// Merge consecutive rows sharing an identical status pair into closed
/// `[from, to]` segments. Rows must be contiguous and ascending by margin.
pub fn segments_from_rows(rows: &[MarginRow]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut iter = rows.iter();

    let Some(first) = iter.next() else {
        return segments;
    };

    let mut start = first.margin;
    let mut last = first.margin;
    let mut current = (first.side_a, first.side_b);

    for row in iter {
        if (row.side_a, row.side_b) != current {
            segments.push(Segment {
                from: start,
                to: last,
                side_a: current.0,
                side_b: current.1,
            });
            start = row.margin;
            current = (row.side_a, row.side_b);
        }
        last = row.margin;
    }

    segments.push(Segment {
        from: start,
        to: last,
        side_a: current.0,
        side_b: current.1,
    });

    segments
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
