use std::fs;
use std::path::Path;

use crate::record::compression::{compress, decompress};
use crate::record::{BufferReader, BufferWriter, Codec, Compression, Record, Result};

/// Serialize `records` back to back with no framing.
pub fn encode_stream(codec: &Codec, records: &[Record]) -> Result<Vec<u8>> {
	let mut writer = BufferWriter::new();
	for record in records {
		codec.serialize(&mut writer, record)?;
	}
	Ok(writer.into_inner())
}

/// Decode records until `bytes` is exhausted.
pub fn decode_stream(codec: &Codec, bytes: &[u8]) -> Result<Vec<Record>> {
	let mut reader = BufferReader::new(bytes);
	let mut records = Vec::new();
	while !reader.is_exhausted() {
		records.push(codec.deserialize(&mut reader)?);
	}
	Ok(records)
}

/// Decoded contents of a record stream file.
#[derive(Debug)]
pub struct StreamFile {
	/// Compression detected on disk.
	pub compression: Compression,
	/// Size of the file on disk.
	pub stored_len: usize,
	/// Size of the raw record stream.
	pub raw_len: usize,
	/// Records in stream order.
	pub records: Vec<Record>,
}

impl StreamFile {
	/// Read, decompress, and decode a stream file.
	pub fn open(path: impl AsRef<Path>, codec: &Codec) -> Result<Self> {
		let stored = fs::read(path)?;
		let stored_len = stored.len();
		let (compression, raw) = decompress(stored)?;
		let records = decode_stream(codec, &raw)?;

		Ok(Self {
			compression,
			stored_len,
			raw_len: raw.len(),
			records,
		})
	}
}

/// Encode `records` and write them to `path`, returning the bytes written.
pub fn write_stream_file(path: impl AsRef<Path>, codec: &Codec, records: &[Record], compression: Compression) -> Result<usize> {
	let raw = encode_stream(codec, records)?;
	let stored = compress(raw, compression)?;
	fs::write(path, &stored)?;
	Ok(stored.len())
}
