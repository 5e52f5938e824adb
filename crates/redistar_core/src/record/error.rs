use std::collections::TryReserveError;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors produced while building, reading, encoding, and decoding records.
#[derive(Debug, Error)]
pub enum RecordError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Buffer or container allocation failed.
	#[error("allocation failed: {0}")]
	Alloc(#[from] TryReserveError),
	/// Typed accessor or mutator called on the wrong variant.
	#[error("record type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Variant the caller asked for.
		expected: &'static str,
		/// Variant the record actually holds.
		got: &'static str,
	},
	/// List index was outside `0..len`.
	#[error("list index out of bounds: index={index}, len={len}")]
	IndexOutOfBounds {
		/// Requested index.
		index: usize,
		/// List length at the time of the call.
		len: usize,
	},
	/// Pop was called on an empty list.
	#[error("pop from empty list")]
	PopEmpty,
	/// Variant has no wire representation.
	#[error("{kind} records can not be serialized")]
	NotSerializable {
		/// Variant label.
		kind: &'static str,
	},
	/// Variant cannot be deep-copied.
	#[error("{kind} records can not be cloned")]
	NotCloneable {
		/// Variant label.
		kind: &'static str,
	},
	/// Stream carried a tag outside the known variant set.
	#[error("unknown record tag {tag} at offset {at}")]
	UnknownTag {
		/// Raw tag value.
		tag: i64,
		/// Byte offset of the tag.
		at: usize,
	},
	/// Foreign-object variant used without an installed runtime.
	#[error("foreign object records are unsupported: no foreign runtime installed")]
	ForeignUnsupported,
	/// Foreign runtime hook reported a failure.
	#[error("foreign runtime: {message}")]
	Foreign {
		/// Hook-provided description.
		message: String,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Length prefix or element count was negative.
	#[error("invalid length {len} at offset {at}")]
	InvalidLength {
		/// Parsed signed length.
		len: i64,
		/// Byte offset of the length prefix.
		at: usize,
	},
	/// Presence flag was neither 0 nor 1.
	#[error("invalid presence flag {flag} at offset {at}")]
	InvalidPresenceFlag {
		/// Parsed flag value.
		flag: i64,
		/// Byte offset of the flag.
		at: usize,
	},
	/// Byte span exceeded the configured limit.
	#[error("byte span too large: len={len}, max={max}")]
	BytesTooLarge {
		/// Declared span length.
		len: usize,
		/// Maximum permitted span length.
		max: usize,
	},
	/// List element count exceeded the configured limit.
	#[error("list too large: count={count}, max={max}")]
	ListTooLarge {
		/// Declared element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Record nesting exceeded the configured limit.
	#[error("record depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decompression output exceeded the safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}

impl RecordError {
	/// Build a hook failure from any displayable message.
	pub fn foreign(message: impl Into<String>) -> Self {
		Self::Foreign { message: message.into() }
	}

	/// Whether this error is a violated contract rather than a resource failure.
	///
	/// Faults are never retried: they mean the caller misused a record or the
	/// stream carries a variant that can not legally appear on the wire.
	pub fn is_fault(&self) -> bool {
		matches!(
			self,
			Self::TypeMismatch { .. }
				| Self::IndexOutOfBounds { .. }
				| Self::PopEmpty
				| Self::NotSerializable { .. }
				| Self::NotCloneable { .. }
				| Self::UnknownTag { .. }
				| Self::ForeignUnsupported
		)
	}
}
