mod buffer;
mod codec;
mod compression;
mod error;
mod foreign;
mod handle;
mod key;
mod lifecycle;
mod list;
mod map;
mod stream;
mod value;

/// Wire primitives: little-endian `i64`, length-prefixed spans, NUL-terminated strings.
pub use buffer::{BufferReader, BufferWriter};
/// Recursive wire codec, its options, and default-option entry points.
pub use codec::{Codec, CodecOptions, FloatEncoding, deserialize_record, serialize_record};
/// Stream compression detection and encoding.
pub use compression::{Compression, ZSTD_MAGIC, compress, decompress};
/// Error and result aliases.
pub use error::{RecordError, Result};
/// Foreign-object variant and its injected runtime hooks.
pub use foreign::{ForeignId, ForeignRecord, ForeignRuntime};
/// External-handle variant and its close contract.
pub use handle::{HandleRecord, ResourceHandle};
/// Key-plus-optional-value variant.
pub use key::KeyRecord;
/// Single teardown entry point.
pub use lifecycle::destroy;
/// Ordered child list variant.
pub use list::ListRecord;
/// String-keyed map variant.
pub use map::MapRecord;
/// Concatenated record streams and stream files.
pub use stream::{StreamFile, decode_stream, encode_stream, write_stream_file};
/// The record type and its discriminator.
pub use value::{Record, RecordType};
