use std::path::PathBuf;

use redistar::record::{Record, Result, StreamFile};

use crate::cmd::json::JsonRecord;
use crate::cmd::util::{CodecArgs, emit_json, truncate};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub codec: CodecArgs,
	#[arg(long)]
	pub json: bool,
}

/// Output truncation and formatting limits for decoded records.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for byte payloads.
	pub max_bytes_len: usize,
	/// Maximum number of children printed for lists and maps.
	pub max_items: usize,
	/// Maximum recursive print depth.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_bytes_len: 200,
			max_items: 16,
			max_print_depth: 8,
		}
	}
}

/// Decode a stream file and print each record.
pub fn run(args: Args) -> Result<()> {
	let Args { path, codec, json } = args;

	let file = StreamFile::open(&path, &codec.codec())?;

	if json {
		let records = file.records.iter().map(JsonRecord::from_record).collect::<Result<Vec<_>>>()?;
		emit_json(&InspectJson {
			path: path.display().to_string(),
			compression: file.compression.as_str().to_owned(),
			records,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", file.compression.as_str());
	println!("records: {}", file.records.len());
	let options = PrintOptions::default();
	for (index, record) in file.records.iter().enumerate() {
		println!("#{index}:");
		for line in render_record(record, options) {
			println!("  {line}");
		}
	}

	Ok(())
}

/// Render one record tree as indented lines.
pub fn render_record(record: &Record, options: PrintOptions) -> Vec<String> {
	let mut out = Vec::new();
	render_into(&mut out, record, 0, 0, options);
	out
}

fn render_into(out: &mut Vec<String>, record: &Record, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match record {
		Record::Integer(value) => out.push(format!("{pad}{value}")),
		Record::Float(value) => out.push(format!("{pad}{value:?}")),
		Record::Bytes(value) => match std::str::from_utf8(value) {
			Ok(text) => out.push(format!("{pad}\"{}\"", truncate(text, options.max_bytes_len))),
			Err(_) => out.push(format!("{pad}bytes[{}]", value.len())),
		},
		Record::List(list) => {
			if depth >= options.max_print_depth {
				out.push(format!("{pad}[... {} items]", list.len()));
				return;
			}
			out.push(format!("{pad}["));
			for item in list.iter().take(options.max_items) {
				render_into(out, item, indent + 2, depth + 1, options);
			}
			if list.len() > options.max_items {
				out.push(format!("{pad}  ... {} more", list.len() - options.max_items));
			}
			out.push(format!("{pad}]"));
		}
		Record::Key(key) => {
			let name = String::from_utf8_lossy(key.key());
			match key.value() {
				None => out.push(format!("{pad}{name:?} = null")),
				Some(value) if depth >= options.max_print_depth => out.push(format!("{pad}{name:?} = <{}>", value.record_type())),
				Some(value) => {
					out.push(format!("{pad}{name:?} ="));
					render_into(out, value, indent + 2, depth + 1, options);
				}
			}
		}
		Record::Map(map) => {
			if depth >= options.max_print_depth {
				out.push(format!("{pad}{{... {} entries}}", map.len()));
				return;
			}
			let mut entries: Vec<_> = map.iter().collect();
			entries.sort_by(|left, right| left.0.cmp(right.0));
			out.push(format!("{pad}{{"));
			for (key, value) in entries.iter().take(options.max_items) {
				out.push(format!("{pad}  {key:?}:"));
				render_into(out, value, indent + 4, depth + 1, options);
			}
			if entries.len() > options.max_items {
				out.push(format!("{pad}  ... {} more", entries.len() - options.max_items));
			}
			out.push(format!("{pad}}}"));
		}
		Record::Handle(handle) => out.push(format!("{pad}<handle {handle:?}>")),
		Record::Foreign(foreign) => out.push(format!("{pad}<foreign 0x{:x}>", foreign.obj().0)),
	}
}

#[derive(serde::Serialize)]
struct InspectJson {
	path: String,
	compression: String,
	records: Vec<JsonRecord>,
}
