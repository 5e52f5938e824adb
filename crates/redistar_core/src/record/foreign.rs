use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::record::{BufferReader, BufferWriter, Result};

/// Opaque identity of an object owned by a foreign runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeignId(pub u64);

/// Hooks into a foreign runtime that owns reference-counted objects.
///
/// Installed once at startup and shared by every foreign record. The runtime
/// alone knows how to encode its objects; the codec only writes the tag.
pub trait ForeignRuntime: Send + Sync + fmt::Debug {
	/// Increment the object's reference count.
	fn retain(&self, obj: ForeignId);

	/// Decrement the object's reference count.
	fn release(&self, obj: ForeignId);

	/// Write the object's payload into `writer`.
	fn serialize(&self, obj: ForeignId, writer: &mut BufferWriter) -> Result<()>;

	/// Rebuild an object from `reader`.
	///
	/// The returned object is not yet retained on behalf of the record; the
	/// codec retains it when wrapping.
	fn deserialize(&self, reader: &mut BufferReader<'_>) -> Result<ForeignId>;
}

/// Shared reference to a foreign object.
///
/// Attaching and cloning retain the object; dropping releases it.
pub struct ForeignRecord {
	obj: ForeignId,
	runtime: Arc<dyn ForeignRuntime>,
}

impl ForeignRecord {
	/// Attach to `obj`, retaining it once.
	pub fn attach(runtime: Arc<dyn ForeignRuntime>, obj: ForeignId) -> Self {
		runtime.retain(obj);
		Self { obj, runtime }
	}

	/// Return the referenced object.
	pub fn obj(&self) -> ForeignId {
		self.obj
	}

	/// Return the runtime owning the object.
	pub fn runtime(&self) -> &Arc<dyn ForeignRuntime> {
		&self.runtime
	}
}

impl Clone for ForeignRecord {
	fn clone(&self) -> Self {
		Self::attach(Arc::clone(&self.runtime), self.obj)
	}
}

impl Drop for ForeignRecord {
	fn drop(&mut self) {
		trace!(obj = self.obj.0, "releasing foreign object");
		self.runtime.release(self.obj);
	}
}

impl fmt::Debug for ForeignRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ForeignRecord").field("obj", &self.obj).finish_non_exhaustive()
	}
}
