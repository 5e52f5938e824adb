#![allow(missing_docs)]

use redistar::record::{BufferReader, Codec, ForeignId, Record, RecordError};
use redistar_testkit::CountingRuntime;

#[test]
fn attach_and_destroy_are_balanced() {
	let runtime = CountingRuntime::new();
	let record = Record::foreign(runtime.clone(), ForeignId(1));
	assert_eq!(runtime.refs(ForeignId(1)), 1);

	let copy = record.try_clone().expect("foreign records clone by retaining");
	assert_eq!(runtime.refs(ForeignId(1)), 2);

	drop(record);
	drop(copy);
	assert_eq!(runtime.refs(ForeignId(1)), 0);
}

#[test]
fn round_trip_leaves_refcount_net_unchanged() {
	let runtime = CountingRuntime::new();
	let codec = Codec::default().with_foreign_runtime(runtime.clone());

	let mut list = Record::list();
	let items = list.as_list_mut().expect("list access succeeds");
	items.push(codec.foreign_record(ForeignId(7)).expect("runtime installed"));
	items.push(Record::key("obj", Some(codec.foreign_record(ForeignId(8)).expect("runtime installed"))));

	let bytes = codec.serialize_to_vec(&list).expect("serialize succeeds");
	let decoded = codec.deserialize(&mut BufferReader::new(&bytes)).expect("deserialize succeeds");
	assert_eq!(decoded, list);
	assert_eq!(runtime.deserialized(), 2);
	assert_eq!(runtime.refs(ForeignId(7)), 2);
	assert_eq!(runtime.refs(ForeignId(8)), 2);

	drop(list);
	drop(decoded);
	assert_eq!(runtime.total_refs(), 0);
}

#[test]
fn serialize_uses_the_codec_runtime() {
	let runtime = CountingRuntime::new();
	let record = Record::foreign(runtime.clone(), ForeignId(3));

	let foreign = record.as_foreign().expect("foreign access succeeds");
	assert_eq!(foreign.obj(), ForeignId(3));

	let err = Codec::default().serialize_to_vec(&record).expect_err("encode needs a runtime");
	assert!(matches!(err, RecordError::ForeignUnsupported));

	let bytes = Codec::default()
		.with_foreign_runtime(runtime.clone())
		.serialize_to_vec(&record)
		.expect("serialize succeeds");
	assert_eq!(&bytes[..8], &8_i64.to_le_bytes());
	assert_eq!(&bytes[8..], &3_i64.to_le_bytes());

	let err = Codec::default().deserialize(&mut BufferReader::new(&bytes)).expect_err("decode needs a runtime");
	assert!(matches!(err, RecordError::ForeignUnsupported));
	assert_eq!(runtime.deserialized(), 0);
	assert_eq!(runtime.refs(ForeignId(3)), 1);
}
