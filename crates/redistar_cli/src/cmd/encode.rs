use std::fs;
use std::path::PathBuf;

use redistar::record::{Compression, Record, Result, write_stream_file};
use tracing::info;

use crate::cmd::json::JsonRecord;
use crate::cmd::util::CodecArgs;

#[derive(clap::Args)]
pub struct Args {
	/// JSON file holding an array of tagged records.
	pub input: PathBuf,
	#[arg(long = "out", short = 'o')]
	pub out: PathBuf,
	#[arg(long)]
	pub zstd: bool,
	#[command(flatten)]
	pub codec: CodecArgs,
}

/// Encode JSON records into a stream file.
pub fn run(args: Args) -> Result<()> {
	let Args { input, out, zstd, codec } = args;

	let text = fs::read(&input)?;
	let parsed: Vec<JsonRecord> = serde_json::from_slice(&text).map_err(std::io::Error::from)?;
	let records: Vec<Record> = parsed.into_iter().map(JsonRecord::into_record).collect();

	let compression = if zstd { Compression::Zstd } else { Compression::None };
	let written = write_stream_file(&out, &codec.codec(), &records, compression)?;
	info!(records = records.len(), bytes = written, compression = compression.as_str(), "stream written");

	println!("records: {}", records.len());
	println!("bytes: {written}");
	println!("compression: {}", compression.as_str());
	Ok(())
}
