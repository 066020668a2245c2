//! Row lookup and navigation within a table.
//!
//! Tables hold at most 100 rows, so lookups scan linearly. The first row
//! whose range contains the value wins, which keeps behavior defined for
//! overlapping tables.

use wf_core::Row;

/// Index of the first row whose range contains `value`.
pub fn locate(rows: &[Row], value: u32) -> Option<usize> {
    rows.iter().position(|row| row.contains(value))
}

/// The row containing `value`.
pub fn row_for(rows: &[Row], value: u32) -> Option<&Row> {
    locate(rows, value).and_then(|index| rows.get(index))
}

/// The row immediately before the one containing `value`.
pub fn previous(rows: &[Row], value: u32) -> Option<&Row> {
    previous_index(rows, value).and_then(|index| rows.get(index))
}

/// The row immediately after the one containing `value`.
pub fn next(rows: &[Row], value: u32) -> Option<&Row> {
    next_index(rows, value).and_then(|index| rows.get(index))
}

/// Index of the row immediately before the one containing `value`.
pub fn previous_index(rows: &[Row], value: u32) -> Option<usize> {
    locate(rows, value)?.checked_sub(1)
}

/// Index of the row immediately after the one containing `value`.
pub fn next_index(rows: &[Row], value: u32) -> Option<usize> {
    let index = locate(rows, value)? + 1;
    (index < rows.len()).then_some(index)
}

/// Index of the row before `index`, if any.
pub fn index_before(index: usize) -> Option<usize> {
    index.checked_sub(1)
}

/// Index of the row after `index`, if the table has one.
pub fn index_after(rows: &[Row], index: usize) -> Option<usize> {
    let next = index.checked_add(1)?;
    (next < rows.len()).then_some(next)
}

/// Returns true if a row precedes the one containing `value`.
pub fn has_previous(rows: &[Row], value: u32) -> bool {
    previous(rows, value).is_some()
}

/// Returns true if a row follows the one containing `value`.
pub fn has_next(rows: &[Row], value: u32) -> bool {
    next(rows, value).is_some()
}
