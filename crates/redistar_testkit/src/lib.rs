//! Shared test helpers for workspace crates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use redistar::record::{BufferReader, BufferWriter, ForeignId, ForeignRuntime, ResourceHandle, Result};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Unique path under the system temp dir for one test artifact.
pub fn scratch_path(name: &str) -> PathBuf {
	static NEXT: AtomicUsize = AtomicUsize::new(0);
	let seq = NEXT.fetch_add(1, Ordering::Relaxed);
	std::env::temp_dir().join(format!("redistar-{}-{seq}-{name}", std::process::id()))
}

/// Install a test-writer tracing subscriber; later calls are no-ops.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// Foreign runtime that tracks reference counts per object.
///
/// Objects are encoded on the wire as their `i64` id.
#[derive(Debug, Default)]
pub struct CountingRuntime {
	refs: Mutex<HashMap<u64, i64>>,
	deserialized: AtomicUsize,
}

impl CountingRuntime {
	/// Create a shared runtime.
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Current reference count of `obj`.
	pub fn refs(&self, obj: ForeignId) -> i64 {
		self.refs.lock().expect("refs lock").get(&obj.0).copied().unwrap_or(0)
	}

	/// Sum of all reference counts.
	pub fn total_refs(&self) -> i64 {
		self.refs.lock().expect("refs lock").values().sum()
	}

	/// Number of objects rebuilt through [`ForeignRuntime::deserialize`].
	pub fn deserialized(&self) -> usize {
		self.deserialized.load(Ordering::Relaxed)
	}
}

impl ForeignRuntime for CountingRuntime {
	fn retain(&self, obj: ForeignId) {
		*self.refs.lock().expect("refs lock").entry(obj.0).or_insert(0) += 1;
	}

	fn release(&self, obj: ForeignId) {
		*self.refs.lock().expect("refs lock").entry(obj.0).or_insert(0) -= 1;
	}

	fn serialize(&self, obj: ForeignId, writer: &mut BufferWriter) -> Result<()> {
		writer.write_i64(obj.0 as i64)
	}

	fn deserialize(&self, reader: &mut BufferReader<'_>) -> Result<ForeignId> {
		let id = reader.read_i64()?;
		self.deserialized.fetch_add(1, Ordering::Relaxed);
		Ok(ForeignId(id as u64))
	}
}

/// External handle that counts how often it was closed.
#[derive(Debug, Clone, Default)]
pub struct CountingHandle {
	closes: Arc<AtomicUsize>,
}

impl CountingHandle {
	/// Create a handle with a fresh counter.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of times any clone of this handle was closed.
	pub fn closes(&self) -> usize {
		self.closes.load(Ordering::Relaxed)
	}

	/// Box a clone sharing this counter, ready for `Record::handle`.
	pub fn boxed(&self) -> Box<dyn ResourceHandle> {
		Box::new(self.clone())
	}
}

impl ResourceHandle for CountingHandle {
	fn close(&mut self) {
		self.closes.fetch_add(1, Ordering::Relaxed);
	}
}
