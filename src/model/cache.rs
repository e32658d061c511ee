//! RowCache - Sparse Row Storage
//!
//! Rows are keyed by absolute index under the remote ordering. The cache is
//! sparse: only ranges the presentation layer actually needed are resident.
//! Every resident row belongs to the current sort/search generation; the map
//! is purged before any row of a new generation is inserted.

use ahash::AHashMap;

use crate::domain::query::RowRange;
use crate::domain::record::Record;

/// Sparse index-keyed row cache with known-total tracking
#[derive(Debug, Default)]
pub struct RowCache {
    rows: AHashMap<u64, Record>,
    known_total: Option<u64>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row lookup by absolute index
    pub fn row(&self, index: u64) -> Option<&Record> {
        self.rows.get(&index)
    }

    /// Whether a row is resident
    pub fn contains(&self, index: u64) -> bool {
        self.rows.contains_key(&index)
    }

    /// The sub-range of `range` still missing from the cache, shrunk past
    /// cached leading and trailing rows. `None` when fully resident.
    ///
    /// Interior holes stay inside the returned span; the fetch that fills the
    /// span covers them too.
    pub fn missing_span(&self, range: RowRange) -> Option<RowRange> {
        let mut start = range.start;
        let mut end = range.end;

        while start <= end && self.contains(start) {
            if start == end {
                return None;
            }
            start += 1;
        }
        while end > start && self.contains(end) {
            end -= 1;
        }

        Some(RowRange::new(start, end))
    }

    /// Merge consecutively indexed rows starting at `start`.
    ///
    /// Returns the inclusive range actually merged, or `None` for an empty
    /// row set (a fetch past the end of the result set).
    pub fn insert_rows(&mut self, start: u64, rows: Vec<Record>) -> Option<RowRange> {
        if rows.is_empty() {
            return None;
        }
        let end = start + rows.len() as u64 - 1;
        for (offset, row) in rows.into_iter().enumerate() {
            self.rows.insert(start + offset as u64, row);
        }
        Some(RowRange::new(start, end))
    }

    /// Total row count learned from a fetch response, if any
    pub fn known_total(&self) -> Option<u64> {
        self.known_total
    }

    pub fn set_known_total(&mut self, total: u64) {
        self.known_total = Some(total);
    }

    /// Known total when learned, else a provisional count: highest resident
    /// index plus one, so the renderer can show a growing row count.
    pub fn len(&self) -> u64 {
        self.known_total.unwrap_or_else(|| {
            self.rows
                .keys()
                .max()
                .map(|highest| highest + 1)
                .unwrap_or(0)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of resident rows (not the logical length)
    pub fn resident_rows(&self) -> usize {
        self.rows.len()
    }

    /// Purge all rows and forget the known total. Called on every sort or
    /// search change, before the generation counter advances.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.known_total = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(index: u64) -> Record {
        Record::from_value(json!({"identity": format!("row-{index}")}), &[]).expect("valid row")
    }

    fn rows(range: RowRange) -> Vec<Record> {
        (range.start..=range.end).map(row).collect()
    }

    #[test]
    fn test_missing_span_on_empty_cache_is_whole_range() {
        let cache = RowCache::new();
        assert_eq!(
            cache.missing_span(RowRange::new(0, 19)),
            Some(RowRange::new(0, 19))
        );
    }

    #[test]
    fn test_missing_span_shrinks_cached_edges() {
        let mut cache = RowCache::new();
        cache.insert_rows(0, rows(RowRange::new(0, 9)));
        cache.insert_rows(30, rows(RowRange::new(30, 49)));

        // [0,9] cached, [30,49] cached, so [5,40] shrinks to [10,29]
        assert_eq!(
            cache.missing_span(RowRange::new(5, 40)),
            Some(RowRange::new(10, 29))
        );
    }

    #[test]
    fn test_missing_span_fully_resident_is_none() {
        let mut cache = RowCache::new();
        cache.insert_rows(0, rows(RowRange::new(0, 49)));
        assert_eq!(cache.missing_span(RowRange::new(10, 30)), None);
        assert_eq!(cache.missing_span(RowRange::new(0, 49)), None);
        assert_eq!(cache.missing_span(RowRange::new(25, 25)), None);
    }

    #[test]
    fn test_missing_span_keeps_interior_holes() {
        let mut cache = RowCache::new();
        cache.insert_rows(0, rows(RowRange::new(0, 9)));
        cache.insert_rows(20, rows(RowRange::new(20, 29)));

        // The hole [10,19] sits inside; span must still start at 10
        assert_eq!(
            cache.missing_span(RowRange::new(0, 29)),
            Some(RowRange::new(10, 19))
        );
    }

    #[test]
    fn test_len_prefers_known_total() {
        let mut cache = RowCache::new();
        cache.insert_rows(0, rows(RowRange::new(0, 9)));
        assert_eq!(cache.len(), 10);

        cache.set_known_total(500);
        assert_eq!(cache.len(), 500);
    }

    #[test]
    fn test_len_provisional_tracks_highest_index() {
        let mut cache = RowCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());

        cache.insert_rows(100, rows(RowRange::new(100, 149)));
        assert_eq!(cache.len(), 150);
    }

    #[test]
    fn test_clear_purges_rows_and_total() {
        let mut cache = RowCache::new();
        cache.insert_rows(0, rows(RowRange::new(0, 9)));
        cache.set_known_total(500);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.known_total(), None);
        assert!(!cache.contains(0));
        assert_eq!(cache.resident_rows(), 0);
    }

    #[test]
    fn test_insert_rows_reports_merged_range() {
        let mut cache = RowCache::new();
        let merged = cache.insert_rows(10, rows(RowRange::new(10, 14)));
        assert_eq!(merged, Some(RowRange::new(10, 14)));
        assert_eq!(cache.insert_rows(10, Vec::new()), None);
        assert_eq!(cache.row(12).and_then(|r| r.get_str("identity")), Some("row-12"));
    }
}
