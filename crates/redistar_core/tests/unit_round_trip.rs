#![allow(missing_docs)]

use redistar::record::{BufferReader, BufferWriter, Codec, CodecOptions, Record, RecordType};

fn sample_tree() -> Record {
	let mut inner = Record::list();
	let items = inner.as_list_mut().expect("list access succeeds");
	items.push(Record::integer(i64::MIN));
	items.push(Record::integer(i64::MAX));
	items.push(Record::float(-0.0));
	items.push(Record::bytes(Vec::new()));
	items.push(Record::bytes(vec![0, 1, 2, 255]));
	items.push(Record::list());

	let mut root = Record::list();
	let items = root.as_list_mut().expect("list access succeeds");
	items.push(Record::key("records", Some(inner)));
	items.push(Record::key("", None));
	items.push(Record::key("ünïcode", Some(Record::key("nested", Some(Record::integer(3))))));
	root
}

#[test]
fn nested_tree_round_trips() {
	let codec = Codec::default();
	let record = sample_tree();
	let bytes = codec.serialize_to_vec(&record).expect("serialize succeeds");

	let mut reader = BufferReader::new(&bytes);
	let decoded = codec.deserialize(&mut reader).expect("deserialize succeeds");
	assert!(reader.is_exhausted());
	assert_eq!(decoded, record);
	assert_eq!(decoded.record_type(), RecordType::List);
}

#[test]
fn records_stack_in_one_writer() {
	let codec = Codec::new(CodecOptions::for_untrusted());
	let mut writer = BufferWriter::new();
	for value in 0..3 {
		codec.serialize(&mut writer, &Record::integer(value)).expect("serialize succeeds");
	}
	codec.serialize(&mut writer, &sample_tree()).expect("serialize succeeds");

	let mut reader = BufferReader::new(writer.as_bytes());
	for value in 0..3 {
		assert_eq!(codec.deserialize(&mut reader).expect("deserialize succeeds"), Record::integer(value));
	}
	assert_eq!(codec.deserialize(&mut reader).expect("deserialize succeeds"), sample_tree());
	assert!(reader.is_exhausted());
}

#[test]
fn encoding_is_deterministic() {
	let codec = Codec::default();
	let first = codec.serialize_to_vec(&sample_tree()).expect("serialize succeeds");
	let second = codec.serialize_to_vec(&sample_tree()).expect("serialize succeeds");
	assert_eq!(first, second);
}
