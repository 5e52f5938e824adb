use crate::record::{Record, RecordError, RecordType};

fn assert_send<T: Send>() {}

#[test]
fn records_are_send() {
	assert_send::<Record>();
}

#[test]
fn tags_round_trip_through_record_type() {
	for kind in RecordType::ALL {
		assert_eq!(RecordType::from_tag(kind.tag()), Some(kind));
	}
	assert_eq!(RecordType::from_tag(0), None);
	assert_eq!(RecordType::from_tag(9), None);
}

#[test]
fn scalar_setters_respect_variant() {
	let mut record = Record::integer(7);
	record.set_integer(9).expect("integer setter succeeds");
	assert_eq!(record.as_integer().expect("integer read succeeds"), 9);

	let err = record.set_float(1.5).expect_err("float setter on integer should fail");
	assert!(matches!(
		err,
		RecordError::TypeMismatch {
			expected: "float",
			got: "integer"
		}
	));
	assert!(err.is_fault());
}

#[test]
fn set_bytes_hands_back_previous_buffer() {
	let mut record = Record::bytes("old");
	let previous = record.set_bytes("new").expect("bytes setter succeeds");
	assert_eq!(previous, b"old");
	assert_eq!(record.as_bytes().expect("bytes read succeeds"), b"new");
}

#[test]
fn list_append_pop_is_lifo() {
	let mut record = Record::list();
	let list = record.as_list_mut().expect("list access succeeds");
	for value in 0..4 {
		list.push(Record::integer(value));
	}
	assert_eq!(list.len(), 4);
	assert_eq!(list.get(2).expect("index in range"), &Record::integer(2));

	for expected in (0..4).rev() {
		let popped = list.pop().expect("pop succeeds");
		assert_eq!(popped.as_integer().expect("integer child"), expected);
	}
	assert!(list.is_empty());

	let err = list.pop().expect_err("pop on empty list should fail");
	assert!(matches!(err, RecordError::PopEmpty));
	assert!(err.is_fault());
}

#[test]
fn list_get_out_of_range_is_fault() {
	let mut record = Record::list();
	record.as_list_mut().expect("list access succeeds").push(Record::integer(1));
	let err = record.as_list().expect("list access succeeds").get(1).expect_err("index 1 is out of range");
	assert!(matches!(err, RecordError::IndexOutOfBounds { index: 1, len: 1 }));
}

#[test]
fn key_record_accessors() {
	let mut record = Record::key("user:1", None);
	let key = record.as_key_mut().expect("key access succeeds");
	assert_eq!(key.key(), b"user:1");
	assert!(key.value().is_none());

	let previous = key.set_key("user:2");
	assert_eq!(previous, b"user:1");
	key.set_value(Some(Record::integer(5)));
	assert_eq!(key.value(), Some(&Record::integer(5)));
	assert_eq!(key.key_str(), Some("user:2"));

	let taken = key.take_value().expect("value was set");
	assert_eq!(taken, Record::integer(5));
	assert!(key.value().is_none());
}

#[test]
fn structural_equality_is_deep() {
	let build = || {
		let mut list = Record::list();
		let items = list.as_list_mut().expect("list access succeeds");
		items.push(Record::float(f64::NAN));
		items.push(Record::key("k", Some(Record::bytes("v"))));
		list
	};

	assert_eq!(build(), build());
	assert_ne!(build(), Record::list());
	assert_ne!(Record::integer(1), Record::float(1.0));
}

#[test]
fn try_clone_is_deep() {
	let mut original = Record::map();
	original.as_map_mut().expect("map access succeeds").set("a", Record::key("k", Some(Record::bytes("v"))));

	let mut copy = original.try_clone().expect("clone succeeds");
	assert_eq!(copy, original);

	copy.as_map_mut().expect("map access succeeds").set("a", Record::integer(0));
	assert_ne!(copy, original, "mutating the copy must not touch the original");
}
