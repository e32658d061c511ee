//! Query - Sort Specification and Row Ranges

use serde::{Deserialize, Serialize};

/// Sort direction for the remote ordering
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire encoding used by the search endpoint (1 ascending, -1 descending)
    pub fn as_wire(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    /// Decode the wire value; anything non-positive sorts descending
    pub fn from_wire(value: i8) -> Self {
        if value > 0 {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

/// Current ordering: column plus direction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name the remote source orders by
    pub field: String,
    /// Ordering direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        // Relevance ordering, best match first
        Self::new("score", SortDirection::Descending)
    }
}

/// Inclusive range of zero-based row indices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start: u64,
    pub end: u64,
}

impl RowRange {
    /// Create a range; callers must uphold `start <= end`
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of rows in the range (inclusive ranges are never empty)
    pub fn count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Whether `index` falls inside the range
    pub fn contains(&self, index: u64) -> bool {
        self.start <= index && index <= self.end
    }

    /// Whether this range fully contains `other`
    pub fn covers(&self, other: RowRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest range containing both `self` and `other`
    pub fn union(&self, other: RowRange) -> RowRange {
        RowRange::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Expand by `padding` rows on both sides, clamped at zero and at
    /// `known_total` when the total row count has been learned.
    pub fn padded(&self, padding: u64, known_total: Option<u64>) -> RowRange {
        let start = self.start.saturating_sub(padding);
        let mut end = self.end.saturating_add(padding);
        if let Some(total) = known_total {
            end = end.min(total.saturating_sub(1)).max(start);
        }
        RowRange::new(start, end)
    }
}

impl std::fmt::Display for RowRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_and_contains() {
        let range = RowRange::new(10, 30);
        assert!(range.contains(10));
        assert!(range.contains(30));
        assert!(!range.contains(31));
        assert!(range.covers(RowRange::new(10, 30)));
        assert!(range.covers(RowRange::new(15, 20)));
        assert!(!range.covers(RowRange::new(5, 20)));
        assert!(!range.covers(RowRange::new(20, 35)));
    }

    #[test]
    fn test_padded_clamps_at_zero_and_total() {
        let range = RowRange::new(10, 60);
        let padded = range.padded(50, None);
        assert_eq!(padded, RowRange::new(0, 110));

        let clamped = range.padded(50, Some(80));
        assert_eq!(clamped, RowRange::new(0, 79));
    }

    #[test]
    fn test_padded_keeps_start_le_end_past_total() {
        // Requested range beyond a tiny known total must stay well-formed
        let range = RowRange::new(90, 99);
        let padded = range.padded(10, Some(5));
        assert!(padded.start <= padded.end);
        assert_eq!(padded.start, 80);
    }

    #[test]
    fn test_sort_direction_wire_round_trip() {
        assert_eq!(SortDirection::Ascending.as_wire(), 1);
        assert_eq!(SortDirection::Descending.as_wire(), -1);
        assert_eq!(SortDirection::from_wire(-1), SortDirection::Descending);
        assert_eq!(SortDirection::from_wire(1), SortDirection::Ascending);
    }
}
