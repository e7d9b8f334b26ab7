//! Working copy of the pawn × work-type priority grid for one pass.

use autowork_logic::constants::priorities::DISABLED;
use autowork_logic::work::WorkTypeId;

/// Dense grid of priorities, one row per pawn in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityTable {
    rows: usize,
    work_types: usize,
    cells: Vec<u8>,
}

impl PriorityTable {
    pub fn new(rows: usize, work_types: usize) -> Self {
        Self {
            rows,
            work_types,
            cells: vec![DISABLED; rows * work_types],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn work_types(&self) -> usize {
        self.work_types
    }

    fn offset(&self, row: usize, work_type: WorkTypeId) -> Option<usize> {
        let col = work_type.index();
        (row < self.rows && col < self.work_types).then(|| row * self.work_types + col)
    }

    pub fn get(&self, row: usize, work_type: WorkTypeId) -> u8 {
        self.offset(row, work_type).map(|o| self.cells[o]).unwrap_or(DISABLED)
    }

    pub fn set(&mut self, row: usize, work_type: WorkTypeId, priority: u8) {
        if let Some(o) = self.offset(row, work_type) {
            self.cells[o] = priority;
        }
    }

    /// Set the cell if it is disabled or `priority` is more urgent.
    ///
    /// Returns whether the cell changed.
    pub fn raise(&mut self, row: usize, work_type: WorkTypeId, priority: u8) -> bool {
        let current = self.get(row, work_type);
        if priority == DISABLED || (current != DISABLED && current <= priority) {
            return false;
        }
        self.set(row, work_type, priority);
        true
    }

    /// Set the cell only if it is disabled. Returns whether it changed.
    pub fn fill(&mut self, row: usize, work_type: WorkTypeId, priority: u8) -> bool {
        if priority == DISABLED || self.get(row, work_type) != DISABLED {
            return false;
        }
        self.set(row, work_type, priority);
        true
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let start = (row * self.work_types).min(self.cells.len());
        let end = (start + self.work_types).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Enabled work types of a pawn.
    pub fn active_count(&self, row: usize) -> usize {
        self.row(row).iter().filter(|&&p| p != DISABLED).count()
    }

    /// Pawns with the work type enabled.
    pub fn assigned_count(&self, work_type: WorkTypeId) -> usize {
        (0..self.rows)
            .filter(|&row| self.get(row, work_type) != DISABLED)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_only_increases_urgency() {
        let mut t = PriorityTable::new(1, 2);
        let wt = WorkTypeId(1);
        assert!(t.raise(0, wt, 3));
        assert!(!t.raise(0, wt, 4));
        assert!(t.raise(0, wt, 1));
        assert_eq!(t.get(0, wt), 1);
        assert!(!t.fill(0, wt, 2));
    }

    #[test]
    fn test_counts() {
        let mut t = PriorityTable::new(3, 2);
        t.set(0, WorkTypeId(0), 1);
        t.set(2, WorkTypeId(0), 4);
        t.set(2, WorkTypeId(1), 2);
        assert_eq!(t.assigned_count(WorkTypeId(0)), 2);
        assert_eq!(t.active_count(2), 2);
        assert_eq!(t.row(2), &[4, 2]);
        assert_eq!(t.get(7, WorkTypeId(0)), 0);
    }
}
