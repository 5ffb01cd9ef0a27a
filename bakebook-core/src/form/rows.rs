//! Ordered, index-addressed rows backing the dynamic parts of the recipe form.

use crate::error::RowIndexError;

/// An ordered list of form rows edited by position.
///
/// Indices are positions: inserting or removing shifts every later row by one
/// and leaves earlier rows where they were.
#[derive(Debug, Clone, PartialEq)]
pub struct RowList<T> {
    rows: Vec<T>,
}

impl<T> Default for RowList<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> RowList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    /// Append a row at the end.
    pub fn push(&mut self, row: T) {
        self.rows.push(row);
    }

    /// Insert a row so it ends up at `index`. `index == len()` appends.
    pub fn insert(&mut self, index: usize, row: T) -> Result<(), RowIndexError> {
        if index > self.rows.len() {
            return Err(self.out_of_range(index));
        }
        self.rows.insert(index, row);
        Ok(())
    }

    /// Remove and return the row at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, RowIndexError> {
        if index >= self.rows.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.rows.remove(index))
    }

    /// Replace the row at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, row: T) -> Result<T, RowIndexError> {
        match self.rows.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, row)),
            None => Err(self.out_of_range(index)),
        }
    }

    fn out_of_range(&self, index: usize) -> RowIndexError {
        RowIndexError {
            index,
            len: self.rows.len(),
        }
    }
}

impl<T> From<Vec<T>> for RowList<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl<T> FromIterator<T> for RowList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RowList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
