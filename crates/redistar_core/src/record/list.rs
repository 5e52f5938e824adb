use std::ops::Index;

use crate::record::{Record, RecordError, Result};

/// Ordered, growable sequence of exclusively owned child records.
///
/// `push` and `pop` are the only mutating primitives; children are never
/// absent.
#[derive(Debug, Default, PartialEq)]
pub struct ListRecord {
	pub(crate) items: Vec<Record>,
}

impl ListRecord {
	/// Create an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty list with room for `capacity` children.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			items: Vec::with_capacity(capacity),
		}
	}

	/// Return the number of children.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Return whether the list has no children.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Reserve room for `additional` children, reporting allocation failure.
	pub fn reserve(&mut self, additional: usize) -> Result<()> {
		self.items.try_reserve(additional)?;
		Ok(())
	}

	/// Append a child, taking ownership of it.
	pub fn push(&mut self, record: Record) {
		self.items.push(record);
	}

	/// Borrow the child at `index`.
	pub fn get(&self, index: usize) -> Result<&Record> {
		let len = self.items.len();
		self.items.get(index).ok_or(RecordError::IndexOutOfBounds { index, len })
	}

	/// Mutably borrow the child at `index`.
	pub fn get_mut(&mut self, index: usize) -> Result<&mut Record> {
		let len = self.items.len();
		self.items.get_mut(index).ok_or(RecordError::IndexOutOfBounds { index, len })
	}

	/// Remove and return the last child.
	pub fn pop(&mut self) -> Result<Record> {
		self.items.pop().ok_or(RecordError::PopEmpty)
	}

	/// Iterate children in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Record> {
		self.items.iter()
	}
}

impl Index<usize> for ListRecord {
	type Output = Record;

	fn index(&self, index: usize) -> &Record {
		&self.items[index]
	}
}

impl<'a> IntoIterator for &'a ListRecord {
	type Item = &'a Record;
	type IntoIter = std::slice::Iter<'a, Record>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

impl FromIterator<Record> for ListRecord {
	fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
		Self {
			items: iter.into_iter().collect(),
		}
	}
}
