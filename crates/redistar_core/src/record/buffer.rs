use crate::record::{RecordError, Result};

/// Growable output buffer implementing the wire primitives.
///
/// All integers are fixed-width little-endian `i64`. Byte spans carry an
/// `i64` length prefix; strings are byte spans with a trailing NUL.
#[derive(Debug, Default, Clone)]
pub struct BufferWriter {
	buf: Vec<u8>,
}

impl BufferWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a writer with preallocated capacity.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	/// Return the number of bytes written so far.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Return whether nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Discard everything written after `len` bytes.
	pub fn truncate(&mut self, len: usize) {
		self.buf.truncate(len);
	}

	/// Borrow the written bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Consume the writer and return the written bytes.
	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}

	/// Write one little-endian `i64`.
	pub fn write_i64(&mut self, value: i64) -> Result<()> {
		self.buf.try_reserve(8)?;
		self.buf.extend_from_slice(&value.to_le_bytes());
		Ok(())
	}

	/// Write a length-prefixed byte span.
	pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		let len = i64::try_from(bytes.len()).map_err(|_| RecordError::InvalidLength {
			len: i64::MAX,
			at: self.buf.len(),
		})?;
		self.write_i64(len)?;
		self.buf.try_reserve(bytes.len())?;
		self.buf.extend_from_slice(bytes);
		Ok(())
	}

	/// Write a NUL-terminated string as a length-prefixed span.
	///
	/// The span length includes the terminator.
	pub fn write_string(&mut self, bytes: &[u8]) -> Result<()> {
		let len = bytes
			.len()
			.checked_add(1)
			.and_then(|len| i64::try_from(len).ok())
			.ok_or(RecordError::InvalidLength {
				len: i64::MAX,
				at: self.buf.len(),
			})?;
		self.write_i64(len)?;
		self.buf.try_reserve(bytes.len() + 1)?;
		self.buf.extend_from_slice(bytes);
		self.buf.push(0);
		Ok(())
	}
}

/// Simple bounded cursor over an immutable byte slice.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> BufferReader<'a> {
	/// Create a reader at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return whether every byte has been consumed.
	pub fn is_exhausted(&self) -> bool {
		self.remaining() == 0
	}

	/// Read exactly `n` bytes and advance the cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(RecordError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one little-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(i64::from_le_bytes(buf))
	}

	/// Read a length-prefixed byte span, borrowing from the input.
	pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
		let at = self.pos;
		let len = self.read_i64()?;
		let len = usize::try_from(len).map_err(|_| RecordError::InvalidLength { len, at })?;
		self.read_exact(len)
	}

	/// Read a NUL-terminated string span.
	///
	/// Yields the bytes before the first NUL; a span without a terminator is
	/// returned whole.
	pub fn read_string(&mut self) -> Result<&'a [u8]> {
		let span = self.read_bytes()?;
		let end = span.iter().position(|byte| *byte == 0).unwrap_or(span.len());
		Ok(&span[..end])
	}
}

#[cfg(test)]
mod tests;
