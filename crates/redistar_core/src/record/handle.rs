use std::fmt;

use tracing::trace;

/// Contract for a live external resource, such as an open store key.
///
/// The record never allocates or frees the resource itself; it only calls
/// [`ResourceHandle::close`] once when it is torn down. Handles must be
/// `Send` so a finished tree can move to another thread.
pub trait ResourceHandle: Send + fmt::Debug {
	/// Release the resource. Called exactly once.
	fn close(&mut self);
}

/// Borrowed external resource held by a [`Record::Handle`](crate::record::Record::Handle).
///
/// Closed on drop. Has no wire representation and can not be cloned.
pub struct HandleRecord {
	handle: Box<dyn ResourceHandle>,
}

impl HandleRecord {
	/// Take over closing responsibility for `handle`.
	pub fn new(handle: Box<dyn ResourceHandle>) -> Self {
		Self { handle }
	}

	/// Borrow the underlying resource.
	pub fn handle(&self) -> &dyn ResourceHandle {
		self.handle.as_ref()
	}

	/// Mutably borrow the underlying resource.
	pub fn handle_mut(&mut self) -> &mut dyn ResourceHandle {
		self.handle.as_mut()
	}
}

impl Drop for HandleRecord {
	fn drop(&mut self) {
		trace!(handle = ?self.handle, "closing external handle");
		self.handle.close();
	}
}

impl fmt::Debug for HandleRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.handle.fmt(f)
	}
}
