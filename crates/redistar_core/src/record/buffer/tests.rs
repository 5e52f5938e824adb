use crate::record::{BufferReader, BufferWriter, RecordError};

#[test]
fn i64_is_little_endian_fixed_width() {
	let mut writer = BufferWriter::new();
	writer.write_i64(-2).expect("write succeeds");
	assert_eq!(writer.as_bytes(), &[0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);

	let mut reader = BufferReader::new(writer.as_bytes());
	assert_eq!(reader.read_i64().expect("read succeeds"), -2);
	assert!(reader.is_exhausted());
}

#[test]
fn string_span_includes_terminator() {
	let mut writer = BufferWriter::new();
	writer.write_string(b"key").expect("write succeeds");
	assert_eq!(writer.len(), 8 + 4);
	assert_eq!(&writer.as_bytes()[..8], &4_i64.to_le_bytes());
	assert_eq!(&writer.as_bytes()[8..], b"key\0");

	let mut reader = BufferReader::new(writer.as_bytes());
	assert_eq!(reader.read_string().expect("read succeeds"), b"key");
}

#[test]
fn string_stops_at_first_nul() {
	let mut writer = BufferWriter::new();
	writer.write_bytes(b"ab\0cd\0").expect("write succeeds");

	let mut reader = BufferReader::new(writer.as_bytes());
	assert_eq!(reader.read_string().expect("read succeeds"), b"ab");
	assert!(reader.is_exhausted(), "whole span should be consumed");
}

#[test]
fn truncated_span_reports_eof() {
	let mut writer = BufferWriter::new();
	writer.write_bytes(b"hello").expect("write succeeds");
	let bytes = writer.into_inner();

	let mut reader = BufferReader::new(&bytes[..10]);
	let err = reader.read_bytes().expect_err("short span should fail");
	assert!(matches!(err, RecordError::UnexpectedEof { at: 8, need: 5, rem: 2 }));
}

#[test]
fn negative_length_prefix_is_rejected() {
	let bytes = (-1_i64).to_le_bytes();
	let mut reader = BufferReader::new(&bytes);
	let err = reader.read_bytes().expect_err("negative length should fail");
	assert!(matches!(err, RecordError::InvalidLength { len: -1, at: 0 }));
}

#[test]
fn truncate_rolls_back_writes() {
	let mut writer = BufferWriter::new();
	writer.write_i64(1).expect("write succeeds");
	let mark = writer.len();
	writer.write_bytes(b"discard").expect("write succeeds");
	writer.truncate(mark);
	assert_eq!(writer.as_bytes(), &1_i64.to_le_bytes());
}
