use redistar::record::{Codec, CodecOptions, FloatEncoding};

/// Codec switches shared by every command that reads or writes streams.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CodecArgs {
	/// Apply limits meant for streams from untrusted peers.
	#[arg(long)]
	pub untrusted: bool,
	/// Override the nesting depth limit.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Use the truncating float encoding of legacy streams.
	#[arg(long = "legacy-floats")]
	pub legacy_floats: bool,
}

impl CodecArgs {
	/// Build the codec these flags describe.
	pub fn codec(&self) -> Codec {
		let mut options = if self.untrusted {
			CodecOptions::for_untrusted()
		} else {
			CodecOptions::default()
		};
		if let Some(max_depth) = self.max_depth {
			options.max_depth = max_depth;
		}
		if self.legacy_floats {
			options.float_encoding = FloatEncoding::Truncate;
		}
		Codec::new(options)
	}
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

/// Cut `input` to `max_len` Unicode scalar values.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests {
	use super::{CodecArgs, truncate};
	use redistar::record::FloatEncoding;

	#[test]
	fn codec_flags_layer_over_presets() {
		let args = CodecArgs {
			untrusted: true,
			max_depth: Some(4),
			legacy_floats: true,
		};
		let codec = args.codec();
		assert_eq!(codec.options().max_depth, 4);
		assert_eq!(codec.options().max_list_len, 65_536);
		assert_eq!(codec.options().float_encoding, FloatEncoding::Truncate);
	}

	#[test]
	fn truncate_counts_chars() {
		assert_eq!(truncate("héllo", 2), "hé...");
		assert_eq!(truncate("hi", 2), "hi");
	}
}
