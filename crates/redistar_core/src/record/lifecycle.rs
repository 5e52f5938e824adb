use tracing::trace;

use crate::record::Record;

/// Tear a record tree down, releasing every owned payload exactly once.
///
/// Children go first in index order; external handles are closed and foreign
/// objects released as they are reached. Taking `record` by value makes a
/// second destroy of the same tree impossible.
pub fn destroy(record: Record) {
	trace!(kind = %record.record_type(), "destroying record");
	drop(record);
}

impl Record {
	/// Move direct children out into `pending`, last child first.
	fn detach_children(&mut self, pending: &mut Vec<Record>) {
		match self {
			Record::List(list) => pending.extend(std::mem::take(&mut list.items).into_iter().rev()),
			Record::Key(key) => {
				if let Some(value) = key.value.take() {
					pending.push(*value);
				}
			}
			Record::Map(map) => pending.extend(map.entries.drain().map(|(_, value)| value)),
			Record::Integer(_) | Record::Float(_) | Record::Bytes(_) | Record::Handle(_) | Record::Foreign(_) => {}
		}
	}
}

impl Drop for Record {
	// Iterative so that dropping an arbitrarily deep tree does not grow the stack.
	fn drop(&mut self) {
		let mut pending = Vec::new();
		self.detach_children(&mut pending);
		while let Some(mut next) = pending.pop() {
			next.detach_children(&mut pending);
		}
	}
}
