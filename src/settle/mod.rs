//! Settlement engine — line splitting, per-margin evaluation, range sweep.

pub mod evaluator;
pub mod splitter;
pub mod sweep;

use serde::Serialize;
use tracing::debug;

use crate::types::{Line, MarginRow, Segment, SettleError, SettlementStatus, Side};

// ---------------------------------------------------------------------------
// Explorer facade
// ---------------------------------------------------------------------------

/// Full sweep output for a pair of lines: the per-margin detail rows and
/// the run-length-encoded segments over the same window.
#[derive(Debug, Clone, Serialize)]
pub struct ExplorerReport {
    /// Half-width of the swept window; rows cover `[-bound, bound]`.
    pub bound: i64,
    pub rows: Vec<MarginRow>,
    pub segments: Vec<Segment>,
}

impl ExplorerReport {
    /// The empty report returned when a line string fails to parse.
    pub fn empty() -> Self {
        Self { bound: 0, rows: Vec::new(), segments: Vec::new() }
    }
}

/// String boundary over the settlement core.
///
/// Parses free-text lines once at the edge and clamps the padding to a
/// configured maximum so adversarial input cannot drive an unbounded
/// sweep. Everything below this facade works on validated [`Line`] values.
pub struct Explorer {
    max_padding: u32,
}

impl Explorer {
    pub fn new(max_padding: u32) -> Self {
        Self { max_padding }
    }

    /// Settle one side against a margin. Errors if the line is invalid.
    pub fn settle(
        &self,
        margin: i64,
        side: Side,
        line: &str,
    ) -> Result<SettlementStatus, SettleError> {
        let line: Line = line.parse()?;
        Ok(evaluator::evaluate_side(margin, side, line))
    }

    /// Sweep both lines into a margin report.
    ///
    /// Degrades to an empty report when either line fails to parse — the
    /// caller is expected to validate first, and with no persisted state
    /// there is no partial result to lose.
    pub fn explore(&self, line_a: &str, line_b: &str, padding: u32) -> ExplorerReport {
        let padding = padding.min(self.max_padding);

        let line_a: Line = match line_a.parse() {
            Ok(l) => l,
            Err(e) => {
                debug!(error = %e, "Side A line rejected");
                return ExplorerReport::empty();
            }
        };
        let line_b: Line = match line_b.parse() {
            Ok(l) => l,
            Err(e) => {
                debug!(error = %e, "Side B line rejected");
                return ExplorerReport::empty();
            }
        };

        let bound = sweep::window_bound(line_a, line_b, padding);
        let rows = sweep::margin_table(line_a, line_b, padding);
        let segments = sweep::segments_from_rows(&rows);

        debug!(
            line_a = %line_a,
            line_b = %line_b,
            padding,
            bound,
            segments = segments.len(),
            "Explorer sweep complete"
        );

        ExplorerReport { bound, rows, segments }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
