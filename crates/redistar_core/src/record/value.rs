use std::fmt;
use std::sync::Arc;

use crate::record::{ForeignId, ForeignRecord, ForeignRuntime, HandleRecord, KeyRecord, ListRecord, MapRecord, RecordError, ResourceHandle, Result};

/// Variant discriminator, with the wire tag each variant is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
	/// Live external resource handle.
	Handle,
	/// Signed 64-bit integer.
	Integer,
	/// 64-bit IEEE double.
	Float,
	/// Owned byte buffer.
	Bytes,
	/// Ordered child records.
	List,
	/// Key string plus optional child record.
	Key,
	/// String-keyed map of child records.
	Map,
	/// Object owned by a foreign runtime.
	Foreign,
}

impl RecordType {
	/// Every variant in tag order.
	pub const ALL: [RecordType; 8] = [
		Self::Handle,
		Self::Integer,
		Self::Float,
		Self::Bytes,
		Self::List,
		Self::Key,
		Self::Map,
		Self::Foreign,
	];

	/// Wire tag written ahead of the payload.
	pub fn tag(self) -> i64 {
		match self {
			Self::Handle => 1,
			Self::Integer => 2,
			Self::Float => 3,
			Self::Bytes => 4,
			Self::List => 5,
			Self::Key => 6,
			Self::Map => 7,
			Self::Foreign => 8,
		}
	}

	/// Map a wire tag back to its variant.
	pub fn from_tag(tag: i64) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.tag() == tag)
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Handle => "handle",
			Self::Integer => "integer",
			Self::Float => "float",
			Self::Bytes => "bytes",
			Self::List => "list",
			Self::Key => "key",
			Self::Map => "map",
			Self::Foreign => "foreign",
		}
	}
}

impl fmt::Display for RecordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The runtime value flowing through the engine.
///
/// Every variant but [`Record::Handle`] and [`Record::Foreign`] owns its
/// payload outright. Dropping a record tears the whole tree down; see
/// [`destroy`](crate::record::destroy).
pub enum Record {
	/// Signed integer scalar.
	Integer(i64),
	/// Floating-point scalar.
	Float(f64),
	/// Owned byte buffer.
	Bytes(Vec<u8>),
	/// Ordered child records.
	List(ListRecord),
	/// Key string with an optional child record.
	Key(KeyRecord),
	/// String-keyed map with overwrite-with-free semantics.
	Map(MapRecord),
	/// Borrowed external resource, closed on teardown.
	Handle(HandleRecord),
	/// Shared reference into a foreign runtime.
	Foreign(ForeignRecord),
}

impl Record {
	/// Build an integer record.
	pub fn integer(value: i64) -> Self {
		Self::Integer(value)
	}

	/// Build a float record.
	pub fn float(value: f64) -> Self {
		Self::Float(value)
	}

	/// Build a bytes record, taking ownership of the buffer.
	pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
		Self::Bytes(value.into())
	}

	/// Build an empty list record.
	pub fn list() -> Self {
		Self::List(ListRecord::new())
	}

	/// Build an empty list record with room for `capacity` children.
	pub fn list_with_capacity(capacity: usize) -> Self {
		Self::List(ListRecord::with_capacity(capacity))
	}

	/// Build a key record.
	pub fn key(key: impl Into<Vec<u8>>, value: Option<Record>) -> Self {
		Self::Key(KeyRecord::new(key, value))
	}

	/// Build an empty map record.
	pub fn map() -> Self {
		Self::Map(MapRecord::new())
	}

	/// Wrap a live external resource.
	pub fn handle(handle: Box<dyn ResourceHandle>) -> Self {
		Self::Handle(HandleRecord::new(handle))
	}

	/// Attach a foreign object, retaining it once.
	pub fn foreign(runtime: Arc<dyn ForeignRuntime>, obj: ForeignId) -> Self {
		Self::Foreign(ForeignRecord::attach(runtime, obj))
	}

	/// Return the active variant.
	pub fn record_type(&self) -> RecordType {
		match self {
			Self::Integer(_) => RecordType::Integer,
			Self::Float(_) => RecordType::Float,
			Self::Bytes(_) => RecordType::Bytes,
			Self::List(_) => RecordType::List,
			Self::Key(_) => RecordType::Key,
			Self::Map(_) => RecordType::Map,
			Self::Handle(_) => RecordType::Handle,
			Self::Foreign(_) => RecordType::Foreign,
		}
	}

	/// Read the integer payload.
	pub fn as_integer(&self) -> Result<i64> {
		match self {
			Self::Integer(value) => Ok(*value),
			other => Err(other.mismatch(RecordType::Integer)),
		}
	}

	/// Replace the integer payload.
	pub fn set_integer(&mut self, value: i64) -> Result<()> {
		match self {
			Self::Integer(slot) => {
				*slot = value;
				Ok(())
			}
			other => Err(other.mismatch(RecordType::Integer)),
		}
	}

	/// Read the float payload.
	pub fn as_float(&self) -> Result<f64> {
		match self {
			Self::Float(value) => Ok(*value),
			other => Err(other.mismatch(RecordType::Float)),
		}
	}

	/// Replace the float payload.
	pub fn set_float(&mut self, value: f64) -> Result<()> {
		match self {
			Self::Float(slot) => {
				*slot = value;
				Ok(())
			}
			other => Err(other.mismatch(RecordType::Float)),
		}
	}

	/// Borrow the byte payload.
	pub fn as_bytes(&self) -> Result<&[u8]> {
		match self {
			Self::Bytes(value) => Ok(value),
			other => Err(other.mismatch(RecordType::Bytes)),
		}
	}

	/// Replace the byte payload, handing the previous buffer back to the caller.
	pub fn set_bytes(&mut self, value: impl Into<Vec<u8>>) -> Result<Vec<u8>> {
		match self {
			Self::Bytes(slot) => Ok(std::mem::replace(slot, value.into())),
			other => Err(other.mismatch(RecordType::Bytes)),
		}
	}

	/// Borrow the list payload.
	pub fn as_list(&self) -> Result<&ListRecord> {
		match self {
			Self::List(list) => Ok(list),
			other => Err(other.mismatch(RecordType::List)),
		}
	}

	/// Mutably borrow the list payload.
	pub fn as_list_mut(&mut self) -> Result<&mut ListRecord> {
		match self {
			Self::List(list) => Ok(list),
			other => Err(other.mismatch(RecordType::List)),
		}
	}

	/// Borrow the key payload.
	pub fn as_key(&self) -> Result<&KeyRecord> {
		match self {
			Self::Key(key) => Ok(key),
			other => Err(other.mismatch(RecordType::Key)),
		}
	}

	/// Mutably borrow the key payload.
	pub fn as_key_mut(&mut self) -> Result<&mut KeyRecord> {
		match self {
			Self::Key(key) => Ok(key),
			other => Err(other.mismatch(RecordType::Key)),
		}
	}

	/// Borrow the map payload.
	pub fn as_map(&self) -> Result<&MapRecord> {
		match self {
			Self::Map(map) => Ok(map),
			other => Err(other.mismatch(RecordType::Map)),
		}
	}

	/// Mutably borrow the map payload.
	pub fn as_map_mut(&mut self) -> Result<&mut MapRecord> {
		match self {
			Self::Map(map) => Ok(map),
			other => Err(other.mismatch(RecordType::Map)),
		}
	}

	/// Borrow the external handle.
	pub fn as_handle(&self) -> Result<&HandleRecord> {
		match self {
			Self::Handle(handle) => Ok(handle),
			other => Err(other.mismatch(RecordType::Handle)),
		}
	}

	/// Borrow the foreign object reference.
	pub fn as_foreign(&self) -> Result<&ForeignRecord> {
		match self {
			Self::Foreign(foreign) => Ok(foreign),
			other => Err(other.mismatch(RecordType::Foreign)),
		}
	}

	/// Deep-copy the record tree.
	///
	/// Foreign objects are shared by retaining them again. External handles can
	/// not be duplicated and fail with [`RecordError::NotCloneable`].
	pub fn try_clone(&self) -> Result<Record> {
		Ok(match self {
			Self::Integer(value) => Self::Integer(*value),
			Self::Float(value) => Self::Float(*value),
			Self::Bytes(value) => {
				let mut out = Vec::new();
				out.try_reserve_exact(value.len())?;
				out.extend_from_slice(value);
				Self::Bytes(out)
			}
			Self::List(list) => {
				let mut out = ListRecord::new();
				out.reserve(list.len())?;
				for item in list.iter() {
					out.push(item.try_clone()?);
				}
				Self::List(out)
			}
			Self::Key(key) => {
				let value = key.value().map(Record::try_clone).transpose()?;
				Self::Key(KeyRecord::new(key.key(), value))
			}
			Self::Map(map) => {
				let mut out = MapRecord::new();
				for (key, value) in map.iter() {
					out.set(key, value.try_clone()?);
				}
				Self::Map(out)
			}
			Self::Handle(_) => {
				return Err(RecordError::NotCloneable {
					kind: RecordType::Handle.as_str(),
				});
			}
			Self::Foreign(foreign) => Self::Foreign(foreign.clone()),
		})
	}

	fn mismatch(&self, expected: RecordType) -> RecordError {
		RecordError::TypeMismatch {
			expected: expected.as_str(),
			got: self.record_type().as_str(),
		}
	}
}

impl PartialEq for Record {
	/// Structural equality over the whole tree.
	///
	/// Floats compare by bit pattern so NaN payloads survive a round-trip
	/// comparison. Handles are never equal; foreign records are equal when they
	/// reference the same object.
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Integer(left), Self::Integer(right)) => left == right,
			(Self::Float(left), Self::Float(right)) => left.to_bits() == right.to_bits(),
			(Self::Bytes(left), Self::Bytes(right)) => left == right,
			(Self::List(left), Self::List(right)) => left == right,
			(Self::Key(left), Self::Key(right)) => left == right,
			(Self::Map(left), Self::Map(right)) => left == right,
			(Self::Handle(_), Self::Handle(_)) => false,
			(Self::Foreign(left), Self::Foreign(right)) => left.obj() == right.obj(),
			_ => false,
		}
	}
}

impl fmt::Debug for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
			Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
			Self::Bytes(value) => f.debug_tuple("Bytes").field(&String::from_utf8_lossy(value)).finish(),
			Self::List(list) => f.debug_tuple("List").field(list).finish(),
			Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
			Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
			Self::Handle(handle) => f.debug_tuple("Handle").field(handle).finish(),
			Self::Foreign(foreign) => f.debug_tuple("Foreign").field(foreign).finish(),
		}
	}
}

impl From<i64> for Record {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for Record {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<Vec<u8>> for Record {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(value)
	}
}

impl From<&str> for Record {
	fn from(value: &str) -> Self {
		Self::Bytes(value.as_bytes().to_vec())
	}
}

#[cfg(test)]
mod tests;
