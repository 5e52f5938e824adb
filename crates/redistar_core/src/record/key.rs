use std::fmt;

use crate::record::{Record, lifecycle};

/// Key string paired with an optional owned child record.
///
/// The key carries its own length and may hold any bytes; the wire format
/// stores it NUL-terminated, so embedded NULs do not survive a round trip.
#[derive(Default, PartialEq)]
pub struct KeyRecord {
	key: Vec<u8>,
	pub(crate) value: Option<Box<Record>>,
}

impl KeyRecord {
	/// Create a key record, taking ownership of key and value.
	pub fn new(key: impl Into<Vec<u8>>, value: Option<Record>) -> Self {
		Self {
			key: key.into(),
			value: value.map(Box::new),
		}
	}

	/// Borrow the key bytes.
	pub fn key(&self) -> &[u8] {
		&self.key
	}

	/// Borrow the key as UTF-8 when valid.
	pub fn key_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.key).ok()
	}

	/// Replace the key, returning the previous one to the caller.
	pub fn set_key(&mut self, key: impl Into<Vec<u8>>) -> Vec<u8> {
		std::mem::replace(&mut self.key, key.into())
	}

	/// Borrow the child record, if any.
	pub fn value(&self) -> Option<&Record> {
		self.value.as_deref()
	}

	/// Mutably borrow the child record, if any.
	pub fn value_mut(&mut self) -> Option<&mut Record> {
		self.value.as_deref_mut()
	}

	/// Install a new child, destroying the previous one.
	pub fn set_value(&mut self, value: Option<Record>) {
		if let Some(old) = std::mem::replace(&mut self.value, value.map(Box::new)) {
			lifecycle::destroy(*old);
		}
	}

	/// Detach and return the child, leaving the slot empty.
	pub fn take_value(&mut self) -> Option<Record> {
		self.value.take().map(|value| *value)
	}
}

impl fmt::Debug for KeyRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KeyRecord")
			.field("key", &String::from_utf8_lossy(&self.key))
			.field("value", &self.value)
			.finish()
	}
}
