use std::collections::BTreeMap;
use std::io::SeekFrom;

mod error;
pub use error::{StreamError, StreamResult};

/// Value stored in a stream [`Metadata`] map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataValue {
    Bool(bool),
    Int(u64),
    Text(String),
}

/// Key/value description of the resource behind a stream.
///
/// Single-resource streams report things like their kind, capability
/// flags and backing uri. Streams with no coherent single-resource
/// description report an empty map.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Resource handed back by [`Stream::detach()`].
#[derive(Debug)]
pub enum Resource {
    /// The buffer behind an in-memory stream.
    Buffer(Vec<u8>),
    /// The handle behind a file stream.
    File(std::fs::File),
}

/// Size of the read requests issued by [`Stream::contents()`].
const CONTENTS_CHUNK_SIZE: usize = 1048576;

/// Byte resource interface of this library.
///
/// `Stream` defines the primitives to read, write and reposition a byte
/// resource, to query its capabilities, and to manage its lifecycle.
/// Memory backed, file backed, lazily materialized and stacked streams
/// all expose this one contract and can therefore be composed freely:
/// a [`StackedStream`] accepts any component implementing `Stream`,
/// boxed as `Box<dyn Stream>`.
///
/// Every method takes `&mut self`. A call on a [`LazyStream`] may
/// materialize the underlying stream and a call on a [`FileStream`] may
/// move the descriptor, for the same reason [`std::io::Read`] and
/// [`std::io::Seek`] take mutable receivers.
///
/// Exhaustion is signaled by empty reads and `eof()`, never by errors.
/// Implementations must answer `is_readable()` truthfully and must not
/// fail `eof()` or `read()` under normal exhaustion.
///
/// Streams perform no internal locking. Sharing one across threads
/// requires external synchronization.
pub trait Stream {
    /// Whether `read()` can succeed on this stream.
    fn is_readable(&mut self) -> bool;

    /// Whether `write()` can succeed on this stream.
    fn is_writable(&mut self) -> bool;

    /// Whether `seek()` can succeed on this stream.
    fn is_seekable(&mut self) -> bool;

    /// Total size of the stream content in bytes, `None` when unknown.
    fn size(&mut self) -> Option<u64>;

    /// Whether the end of the stream data has been reached.
    fn eof(&mut self) -> bool;

    /// Current position in the stream.
    fn tell(&mut self) -> StreamResult<u64>;

    /// Read up to `length` bytes from the current position.
    /// A result shorter than `length` means the end of the data was
    /// reached.
    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>>;

    /// Write `data` at the current position and return the number of
    /// bytes written.
    fn write(&mut self, data: &[u8]) -> StreamResult<usize>;

    /// Move the stream position and return the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64>;

    /// Reset the stream position to the start.
    fn rewind(&mut self) -> StreamResult<()> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Read the remaining stream content, from the current position to
    /// the end of the data.
    fn contents(&mut self) -> StreamResult<Vec<u8>> {
        let mut buffer = Vec::new();
        while !self.eof() {
            let chunk = self.read(CONTENTS_CHUNK_SIZE)?;
            if chunk.is_empty() {
                break;
            }
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer)
    }

    /// Description of the resource behind the stream.
    fn metadata(&mut self) -> Metadata {
        Metadata::new()
    }

    /// Close the resource behind the stream. Closing an already closed
    /// stream is a no-op.
    fn close(&mut self);

    /// Separate the resource behind the stream from the stream and hand
    /// it back, when there is a single well-defined resource to return.
    fn detach(&mut self) -> Option<Resource>;
}

impl Stream for Box<dyn Stream> {
    fn is_readable(&mut self) -> bool {
        (**self).is_readable()
    }

    fn is_writable(&mut self) -> bool {
        (**self).is_writable()
    }

    fn is_seekable(&mut self) -> bool {
        (**self).is_seekable()
    }

    fn size(&mut self) -> Option<u64> {
        (**self).size()
    }

    fn eof(&mut self) -> bool {
        (**self).eof()
    }

    fn tell(&mut self) -> StreamResult<u64> {
        (**self).tell()
    }

    fn read(&mut self, length: usize) -> StreamResult<Vec<u8>> {
        (**self).read(length)
    }

    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        (**self).write(data)
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        (**self).seek(pos)
    }

    fn rewind(&mut self) -> StreamResult<()> {
        (**self).rewind()
    }

    fn contents(&mut self) -> StreamResult<Vec<u8>> {
        (**self).contents()
    }

    fn metadata(&mut self) -> Metadata {
        (**self).metadata()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn detach(&mut self) -> Option<Resource> {
        (**self).detach()
    }
}

mod memory;
pub use memory::MemoryStream;

mod file;
pub use file::FileStream;

mod lazy;
pub use lazy::{LazySource, LazyStream, StreamFactory};

mod stacked;
pub use stacked::{StackSource, StackedStream};

/// Free constructors building streams from bytes, paths, factories or
/// source sequences.
pub mod factory;

/// Module to instantiate streams from a configuration string.
#[cfg(feature = "config")]
pub mod config;
