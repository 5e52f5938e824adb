use std::sync::Arc;

use tracing::debug;

use crate::record::{
	BufferReader, BufferWriter, ForeignId, ForeignRecord, ForeignRuntime, KeyRecord, ListRecord, Record, RecordError, RecordType, Result,
};

/// How float payloads are narrowed into the `i64` wire slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FloatEncoding {
	/// IEEE-754 bit pattern reinterpreted as `i64`. Lossless.
	#[default]
	Bits,
	/// Truncate toward zero on write and widen on read.
	///
	/// Matches legacy streams; fractional parts and
	/// out-of-range magnitudes are lost.
	Truncate,
}

/// Runtime limits and behavior switches for the wire codec.
#[derive(Debug, Clone)]
pub struct CodecOptions {
	/// Maximum record nesting depth, applied in both directions.
	pub max_depth: u32,
	/// Maximum accepted list element count.
	pub max_list_len: usize,
	/// Maximum accepted byte span length.
	pub max_bytes_len: usize,
	/// Float payload encoding.
	pub float_encoding: FloatEncoding,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_list_len: 1 << 20,
			max_bytes_len: 64 * 1024 * 1024,
			float_encoding: FloatEncoding::Bits,
		}
	}
}

impl CodecOptions {
	/// Preset for bytes received from peers that are not trusted.
	pub fn for_untrusted() -> Self {
		Self {
			max_depth: 32,
			max_list_len: 65_536,
			max_bytes_len: 16 * 1024 * 1024,
			float_encoding: FloatEncoding::Bits,
		}
	}
}

/// Recursive, depth-first record serializer and deserializer.
///
/// Each record is written as its `i64` tag followed by a variant payload.
/// Foreign objects are delegated to the installed [`ForeignRuntime`]; without
/// one, both directions fail with [`RecordError::ForeignUnsupported`]. Depth,
/// list and span limits apply on write as well as on read.
#[derive(Debug, Clone, Default)]
pub struct Codec {
	options: CodecOptions,
	foreign: Option<Arc<dyn ForeignRuntime>>,
}

impl Codec {
	/// Create a codec without a foreign runtime.
	pub fn new(options: CodecOptions) -> Self {
		Self { options, foreign: None }
	}

	/// Install the foreign runtime used to encode and decode foreign objects.
	pub fn with_foreign_runtime(mut self, runtime: Arc<dyn ForeignRuntime>) -> Self {
		self.foreign = Some(runtime);
		self
	}

	/// Return the active options.
	pub fn options(&self) -> &CodecOptions {
		&self.options
	}

	/// Return the installed foreign runtime, if any.
	pub fn foreign_runtime(&self) -> Option<&Arc<dyn ForeignRuntime>> {
		self.foreign.as_ref()
	}

	/// Attach `obj` through the installed foreign runtime.
	pub fn foreign_record(&self, obj: ForeignId) -> Result<Record> {
		let runtime = self.foreign.as_ref().ok_or(RecordError::ForeignUnsupported)?;
		Ok(Record::foreign(Arc::clone(runtime), obj))
	}

	/// Append `record` to `writer`.
	///
	/// On failure the writer is rolled back to its length before the call, so
	/// a rejected record leaves no bytes behind.
	pub fn serialize(&self, writer: &mut BufferWriter, record: &Record) -> Result<()> {
		let start = writer.len();
		if let Err(err) = self.serialize_impl(writer, record, 0) {
			debug!(error = %err, kind = %record.record_type(), "record serialize failed");
			writer.truncate(start);
			return Err(err);
		}
		Ok(())
	}

	/// Serialize `record` into a fresh buffer.
	pub fn serialize_to_vec(&self, record: &Record) -> Result<Vec<u8>> {
		let mut writer = BufferWriter::new();
		self.serialize(&mut writer, record)?;
		Ok(writer.into_inner())
	}

	/// Read one record from `reader`.
	///
	/// Any subtree built before a failure is torn down before the error is
	/// returned.
	pub fn deserialize(&self, reader: &mut BufferReader<'_>) -> Result<Record> {
		self.deserialize_impl(reader, 0).inspect_err(|err| {
			debug!(error = %err, at = reader.pos(), "record deserialize failed");
		})
	}

	fn serialize_impl(&self, writer: &mut BufferWriter, record: &Record, depth: u32) -> Result<()> {
		if depth >= self.options.max_depth {
			return Err(RecordError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let kind = record.record_type();
		if matches!(kind, RecordType::Handle | RecordType::Map) {
			return Err(RecordError::NotSerializable { kind: kind.as_str() });
		}

		writer.write_i64(kind.tag())?;
		match record {
			Record::Integer(value) => writer.write_i64(*value),
			Record::Float(value) => writer.write_i64(self.encode_float(*value)),
			Record::Bytes(value) => {
				self.check_bytes_len(value.len())?;
				writer.write_bytes(value)
			}
			Record::List(list) => {
				if list.len() > self.options.max_list_len {
					return Err(RecordError::ListTooLarge {
						count: list.len(),
						max: self.options.max_list_len,
					});
				}
				writer.write_i64(len_to_i64(list.len()))?;
				for item in list.iter() {
					self.serialize_impl(writer, item, depth + 1)?;
				}
				Ok(())
			}
			Record::Key(key) => {
				self.check_bytes_len(key.key().len())?;
				writer.write_string(key.key())?;
				match key.value() {
					Some(value) => {
						writer.write_i64(1)?;
						self.serialize_impl(writer, value, depth + 1)
					}
					None => writer.write_i64(0),
				}
			}
			Record::Foreign(foreign) => {
				let runtime = self.foreign.as_ref().ok_or(RecordError::ForeignUnsupported)?;
				runtime.serialize(foreign.obj(), writer)
			}
			Record::Map(_) | Record::Handle(_) => Err(RecordError::NotSerializable { kind: kind.as_str() }),
		}
	}

	fn deserialize_impl(&self, reader: &mut BufferReader<'_>, depth: u32) -> Result<Record> {
		if depth >= self.options.max_depth {
			return Err(RecordError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let at = reader.pos();
		let tag = reader.read_i64()?;
		let kind = RecordType::from_tag(tag).ok_or(RecordError::UnknownTag { tag, at })?;

		match kind {
			RecordType::Integer => Ok(Record::Integer(reader.read_i64()?)),
			RecordType::Float => Ok(Record::Float(self.decode_float(reader.read_i64()?))),
			RecordType::Bytes => {
				let span = self.read_span(reader)?;
				let mut out = Vec::new();
				out.try_reserve_exact(span.len())?;
				out.extend_from_slice(span);
				Ok(Record::Bytes(out))
			}
			RecordType::List => {
				let count = self.read_count(reader)?;
				let mut list = ListRecord::new();
				// Every child needs at least its 8-byte tag.
				list.reserve(count.min(reader.remaining() / 8))?;
				for _ in 0..count {
					list.push(self.deserialize_impl(reader, depth + 1)?);
				}
				Ok(Record::List(list))
			}
			RecordType::Key => {
				let raw = reader.read_string()?;
				self.check_bytes_len(raw.len())?;
				let mut key = Vec::new();
				key.try_reserve_exact(raw.len())?;
				key.extend_from_slice(raw);

				let flag_at = reader.pos();
				let value = match reader.read_i64()? {
					0 => None,
					1 => Some(self.deserialize_impl(reader, depth + 1)?),
					flag => return Err(RecordError::InvalidPresenceFlag { flag, at: flag_at }),
				};
				Ok(Record::Key(KeyRecord::new(key, value)))
			}
			RecordType::Foreign => {
				let runtime = self.foreign.as_ref().ok_or(RecordError::ForeignUnsupported)?;
				let obj = runtime.deserialize(reader)?;
				Ok(Record::Foreign(ForeignRecord::attach(Arc::clone(runtime), obj)))
			}
			RecordType::Handle | RecordType::Map => Err(RecordError::NotSerializable { kind: kind.as_str() }),
		}
	}

	fn read_span<'a>(&self, reader: &mut BufferReader<'a>) -> Result<&'a [u8]> {
		let at = reader.pos();
		let len = reader.read_i64()?;
		let len = usize::try_from(len).map_err(|_| RecordError::InvalidLength { len, at })?;
		self.check_bytes_len(len)?;
		reader.read_exact(len)
	}

	fn check_bytes_len(&self, len: usize) -> Result<()> {
		if len > self.options.max_bytes_len {
			return Err(RecordError::BytesTooLarge {
				len,
				max: self.options.max_bytes_len,
			});
		}
		Ok(())
	}

	fn read_count(&self, reader: &mut BufferReader<'_>) -> Result<usize> {
		let at = reader.pos();
		let count = reader.read_i64()?;
		let count = usize::try_from(count).map_err(|_| RecordError::InvalidLength { len: count, at })?;
		if count > self.options.max_list_len {
			return Err(RecordError::ListTooLarge {
				count,
				max: self.options.max_list_len,
			});
		}
		Ok(count)
	}

	fn encode_float(&self, value: f64) -> i64 {
		match self.options.float_encoding {
			FloatEncoding::Bits => value.to_bits() as i64,
			FloatEncoding::Truncate => value as i64,
		}
	}

	fn decode_float(&self, raw: i64) -> f64 {
		match self.options.float_encoding {
			FloatEncoding::Bits => f64::from_bits(raw as u64),
			FloatEncoding::Truncate => raw as f64,
		}
	}
}

/// Serialize with default options and no foreign runtime.
pub fn serialize_record(writer: &mut BufferWriter, record: &Record) -> Result<()> {
	Codec::default().serialize(writer, record)
}

/// Deserialize with default options and no foreign runtime.
pub fn deserialize_record(reader: &mut BufferReader<'_>) -> Result<Record> {
	Codec::default().deserialize(reader)
}

fn len_to_i64(len: usize) -> i64 {
	i64::try_from(len).unwrap_or(i64::MAX)
}
