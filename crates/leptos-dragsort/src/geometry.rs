//! Pure insertion geometry, kept free of DOM types so it tests natively.

/// Vertical extent of one candidate row, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f64,
    pub height: f64,
}

impl RowBounds {
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Rectangle the pointer must stay inside for a drop to commit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DropBounds {
    /// Containment with inclusive edges
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Pick the row the placeholder should sit in front of.
///
/// Each row whose center lies below the pointer is a candidate; among
/// them the nearest center wins (the largest negative offset, first
/// one on a tie). `None` means the pointer is below every center and
/// the placeholder belongs at the end.
pub fn insertion_index(rows: &[RowBounds], pointer_y: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, row) in rows.iter().enumerate() {
        let offset = pointer_y - row.center();
        if offset < 0.0 {
            match best {
                Some((_, best_offset)) if offset <= best_offset => {}
                _ => best = Some((index, offset)),
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Whether the pointer strayed beyond `threshold` on either axis
/// since `origin`; exactly on the threshold does not count
pub fn moved_beyond(origin: (f64, f64), current: (f64, f64), threshold: f64) -> bool {
    (current.0 - origin.0).abs() > threshold || (current.1 - origin.1).abs() > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked_rows() -> Vec<RowBounds> {
        // centers at 20, 60, 100
        vec![
            RowBounds { top: 0.0, height: 40.0 },
            RowBounds { top: 40.0, height: 40.0 },
            RowBounds { top: 80.0, height: 40.0 },
        ]
    }

    #[test]
    fn test_pointer_above_all_rows_inserts_first() {
        assert_eq!(insertion_index(&stacked_rows(), -10.0), Some(0));
        assert_eq!(insertion_index(&stacked_rows(), 5.0), Some(0));
    }

    #[test]
    fn test_pointer_between_rows_picks_nearest_center_below() {
        assert_eq!(insertion_index(&stacked_rows(), 30.0), Some(1));
        assert_eq!(insertion_index(&stacked_rows(), 59.9), Some(1));
        assert_eq!(insertion_index(&stacked_rows(), 70.0), Some(2));
    }

    #[test]
    fn test_pointer_below_all_centers_appends() {
        assert_eq!(insertion_index(&stacked_rows(), 100.0), None);
        assert_eq!(insertion_index(&stacked_rows(), 500.0), None);
    }

    #[test]
    fn test_pointer_exactly_on_center_is_not_a_candidate() {
        let rows = vec![RowBounds { top: 0.0, height: 40.0 }];
        assert_eq!(insertion_index(&rows, 20.0), None);
        assert_eq!(insertion_index(&rows, 19.9), Some(0));
    }

    #[test]
    fn test_no_rows_appends() {
        assert_eq!(insertion_index(&[], 42.0), None);
    }

    #[test]
    fn test_rows_out_of_document_order_still_pick_nearest_center() {
        // centers at 100, 20, 60: nearest center below pointer_y=30 is 60
        let rows = vec![
            RowBounds { top: 80.0, height: 40.0 },
            RowBounds { top: 0.0, height: 40.0 },
            RowBounds { top: 40.0, height: 40.0 },
        ];
        assert_eq!(insertion_index(&rows, 30.0), Some(2));
    }

    #[test]
    fn test_drop_bounds_edges_are_inside() {
        let bounds = DropBounds { left: 10.0, top: 20.0, right: 110.0, bottom: 220.0 };

        assert!(bounds.contains(10.0, 20.0));
        assert!(bounds.contains(110.0, 220.0));
        assert!(bounds.contains(60.0, 120.0));
        assert!(!bounds.contains(9.9, 120.0));
        assert!(!bounds.contains(60.0, 220.1));
    }

    #[test]
    fn test_moved_beyond_is_strictly_greater() {
        let origin = (100.0, 100.0);

        assert!(!moved_beyond(origin, (105.0, 100.0), 5.0));
        assert!(!moved_beyond(origin, (100.0, 105.0), 5.0));
        assert!(moved_beyond(origin, (105.1, 100.0), 5.0));
        assert!(moved_beyond(origin, (100.0, 94.9), 5.0));
        assert!(moved_beyond(origin, (94.0, 100.0), 5.0));
    }
}
