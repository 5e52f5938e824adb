use std::collections::BTreeMap;
use std::path::PathBuf;

use redistar::record::{Record, RecordType, Result, StreamFile};

use crate::cmd::util::{CodecArgs, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub codec: CodecArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print stream-level sizes and per-variant counts.
pub fn run(args: Args) -> Result<()> {
	let Args { path, codec, json } = args;

	let file = StreamFile::open(&path, &codec.codec())?;
	let stats = TreeStats::collect(&file.records);

	if json {
		emit_json(&InfoJson {
			path: path.display().to_string(),
			compression: file.compression.as_str().to_owned(),
			stored_len: file.stored_len,
			raw_len: file.raw_len,
			records: file.records.len(),
			max_depth: stats.max_depth,
			types: stats.counts.iter().map(|(kind, count)| (kind.as_str().to_owned(), *count)).collect(),
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", file.compression.as_str());
	println!("stored_len: {}", file.stored_len);
	println!("raw_len: {}", file.raw_len);
	println!("records: {}", file.records.len());
	println!("max_depth: {}", stats.max_depth);
	println!("types:");
	for (kind, count) in &stats.counts {
		println!("  {kind}: {count}");
	}

	Ok(())
}

/// Variant counts and nesting depth over a set of record trees.
#[derive(Debug, Default)]
pub struct TreeStats {
	/// Number of records of each variant, nested ones included.
	pub counts: BTreeMap<RecordType, usize>,
	/// Deepest nesting level seen; a lone scalar has depth 1.
	pub max_depth: usize,
}

impl TreeStats {
	/// Walk every tree without recursion.
	pub fn collect(records: &[Record]) -> Self {
		let mut stats = Self::default();
		let mut stack: Vec<(&Record, usize)> = records.iter().map(|record| (record, 1)).collect();

		while let Some((record, depth)) = stack.pop() {
			*stats.counts.entry(record.record_type()).or_insert(0) += 1;
			stats.max_depth = stats.max_depth.max(depth);
			match record {
				Record::List(list) => stack.extend(list.iter().map(|item| (item, depth + 1))),
				Record::Key(key) => stack.extend(key.value().map(|value| (value, depth + 1))),
				Record::Map(map) => stack.extend(map.iter().map(|(_, value)| (value, depth + 1))),
				_ => {}
			}
		}

		stats
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: String,
	stored_len: usize,
	raw_len: usize,
	records: usize,
	max_depth: usize,
	types: BTreeMap<String, usize>,
}
