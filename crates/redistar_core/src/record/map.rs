use std::collections::HashMap;

use tracing::trace;

use crate::record::{Record, lifecycle};

/// String-keyed map from owned keys to owned child records.
///
/// Iteration order is unspecified. [`MapRecord::set`] destroys any value
/// already stored under the key before installing the new one.
#[derive(Debug, Default, PartialEq)]
pub struct MapRecord {
	pub(crate) entries: HashMap<String, Record>,
}

impl MapRecord {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Store `value` under `key`, destroying any previous value first.
	///
	/// Returns whether the insert took effect.
	pub fn set(&mut self, key: impl Into<String>, value: Record) -> bool {
		let key = key.into();
		if let Some(old) = self.entries.remove(&key) {
			trace!(key = %key, kind = %old.record_type(), "replacing map entry");
			lifecycle::destroy(old);
		}
		self.entries.insert(key, value).is_none()
	}

	/// Borrow the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Record> {
		self.entries.get(key)
	}

	/// Mutably borrow the value stored under `key`.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
		self.entries.get_mut(key)
	}

	/// Detach and return the value stored under `key`.
	pub fn remove(&mut self, key: &str) -> Option<Record> {
		self.entries.remove(key)
	}

	/// Snapshot of all keys, borrowed from the map.
	pub fn keys(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}

	/// Iterate entries in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}
}
