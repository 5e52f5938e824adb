use std::collections::BTreeMap;

use redistar::record::{Record, RecordError, RecordType, Result};

/// Externally tagged JSON form of a record.
///
/// `{"int": 1}`, `{"float": 1.5}` (or `"nan"`, `"inf"`, `"-inf"`), `{"bytes": "text"}`
/// or `{"bytes": [0, 255]}`,
/// `{"list": [...]}`, `{"key": {"key": "k", "value": null}}`, `{"map": {...}}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonRecord {
	Int(i64),
	Float(JsonFloat),
	Bytes(JsonBytes),
	List(Vec<JsonRecord>),
	Key(JsonKey),
	Map(BTreeMap<String, JsonRecord>),
}

/// Float payload. JSON numbers can not hold NaN or infinities, so those are
/// written as tagged strings. NaN payload bits are not kept.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum JsonFloat {
	Finite(f64),
	NonFinite(NonFinite),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NonFinite {
	#[serde(rename = "nan")]
	Nan,
	#[serde(rename = "inf")]
	Inf,
	#[serde(rename = "-inf")]
	NegInf,
}

impl From<f64> for JsonFloat {
	fn from(value: f64) -> Self {
		if value.is_nan() {
			Self::NonFinite(NonFinite::Nan)
		} else if value == f64::INFINITY {
			Self::NonFinite(NonFinite::Inf)
		} else if value == f64::NEG_INFINITY {
			Self::NonFinite(NonFinite::NegInf)
		} else {
			Self::Finite(value)
		}
	}
}

impl From<JsonFloat> for f64 {
	fn from(value: JsonFloat) -> Self {
		match value {
			JsonFloat::Finite(value) => value,
			JsonFloat::NonFinite(NonFinite::Nan) => f64::NAN,
			JsonFloat::NonFinite(NonFinite::Inf) => f64::INFINITY,
			JsonFloat::NonFinite(NonFinite::NegInf) => f64::NEG_INFINITY,
		}
	}
}

/// Byte payload rendered as text when it is valid UTF-8.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum JsonBytes {
	Text(String),
	Raw(Vec<u8>),
}

/// Key record body.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JsonKey {
	pub key: String,
	#[serde(default)]
	pub value: Option<Box<JsonRecord>>,
}

impl JsonRecord {
	/// Render a decoded record. Handles and foreign objects have no JSON form.
	pub fn from_record(record: &Record) -> Result<Self> {
		Ok(match record {
			Record::Integer(value) => Self::Int(*value),
			Record::Float(value) => Self::Float(JsonFloat::from(*value)),
			Record::Bytes(value) => Self::Bytes(match std::str::from_utf8(value) {
				Ok(text) => JsonBytes::Text(text.to_owned()),
				Err(_) => JsonBytes::Raw(value.clone()),
			}),
			Record::List(list) => Self::List(list.iter().map(Self::from_record).collect::<Result<_>>()?),
			Record::Key(key) => Self::Key(JsonKey {
				key: String::from_utf8_lossy(key.key()).into_owned(),
				value: key.value().map(Self::from_record).transpose()?.map(Box::new),
			}),
			Record::Map(map) => Self::Map(
				map.iter()
					.map(|(key, value)| Ok((key.to_owned(), Self::from_record(value)?)))
					.collect::<Result<_>>()?,
			),
			Record::Handle(_) | Record::Foreign(_) => {
				return Err(RecordError::NotSerializable {
					kind: record.record_type().as_str(),
				});
			}
		})
	}

	/// Build the record this JSON value describes.
	pub fn into_record(self) -> Record {
		match self {
			Self::Int(value) => Record::integer(value),
			Self::Float(value) => Record::float(f64::from(value)),
			Self::Bytes(JsonBytes::Text(text)) => Record::bytes(text),
			Self::Bytes(JsonBytes::Raw(raw)) => Record::bytes(raw),
			Self::List(items) => {
				let mut record = Record::list_with_capacity(items.len());
				if let Record::List(list) = &mut record {
					for item in items {
						list.push(item.into_record());
					}
				}
				record
			}
			Self::Key(JsonKey { key, value }) => Record::key(key, value.map(|value| value.into_record())),
			Self::Map(entries) => {
				let mut record = Record::map();
				if let Record::Map(map) = &mut record {
					for (key, value) in entries {
						map.set(key, value.into_record());
					}
				}
				record
			}
		}
	}

	/// Variant this JSON value maps to.
	pub fn record_type(&self) -> RecordType {
		match self {
			Self::Int(_) => RecordType::Integer,
			Self::Float(_) => RecordType::Float,
			Self::Bytes(_) => RecordType::Bytes,
			Self::List(_) => RecordType::List,
			Self::Key(_) => RecordType::Key,
			Self::Map(_) => RecordType::Map,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{JsonBytes, JsonFloat, JsonRecord, NonFinite};
	use redistar::record::{Record, RecordType};

	#[test]
	fn parses_tagged_form() {
		let text = r#"[{"int": 1}, {"bytes": "hi"}, {"bytes": [0, 255]}, {"key": {"key": "k", "value": {"list": [{"float": 0.5}]}}}, {"key": {"key": "empty"}}]"#;
		let parsed: Vec<JsonRecord> = serde_json::from_str(text).expect("json parses");

		assert_eq!(parsed[1], JsonRecord::Bytes(JsonBytes::Text("hi".to_owned())));
		assert_eq!(parsed[2], JsonRecord::Bytes(JsonBytes::Raw(vec![0, 255])));

		let records: Vec<Record> = parsed.into_iter().map(JsonRecord::into_record).collect();
		assert_eq!(records[0], Record::integer(1));
		assert_eq!(records[3].record_type(), RecordType::Key);
		assert!(records[4].as_key().expect("key record").value().is_none());
	}

	#[test]
	fn renders_records_back_to_same_form() {
		let mut list = Record::list();
		list.as_list_mut().expect("list access succeeds").push(Record::bytes(vec![0xff]));
		let record = Record::key("k", Some(list));

		let json = JsonRecord::from_record(&record).expect("render succeeds");
		let text = serde_json::to_string(&json).expect("json encodes");
		assert_eq!(text, r#"{"key":{"key":"k","value":{"list":[{"bytes":[255]}]}}}"#);
		assert_eq!(json.into_record(), record);
	}

	#[test]
	fn non_finite_floats_survive_json() {
		let mut list = Record::list();
		let items = list.as_list_mut().expect("list access succeeds");
		items.push(Record::float(f64::NAN));
		items.push(Record::float(f64::INFINITY));
		items.push(Record::float(f64::NEG_INFINITY));
		items.push(Record::float(-0.5));

		let text = serde_json::to_string(&JsonRecord::from_record(&list).expect("render succeeds")).expect("json encodes");
		assert_eq!(text, r#"{"list":[{"float":"nan"},{"float":"inf"},{"float":"-inf"},{"float":-0.5}]}"#);

		let parsed: JsonRecord = serde_json::from_str(&text).expect("json parses");
		let JsonRecord::List(items) = &parsed else {
			panic!("expected list, got {parsed:?}");
		};
		assert_eq!(items[0], JsonRecord::Float(JsonFloat::NonFinite(NonFinite::Nan)));

		let record = parsed.into_record();
		let values: Vec<f64> = record
			.as_list()
			.expect("list access succeeds")
			.iter()
			.map(|item| item.as_float().expect("float access succeeds"))
			.collect();
		assert!(values[0].is_nan());
		assert_eq!(values[1..], [f64::INFINITY, f64::NEG_INFINITY, -0.5]);
	}
}
